//! Arbitrary-precision signed integer arithmetic for numcell.
//!
//! [`BigInt`] is a sign flag plus a canonical magnitude stored in a shared
//! [`DigitBuffer`](numcell_digits::DigitBuffer). Cloning is a reference
//! count bump; arithmetic always builds its result in fresh storage.
//!
//! ```text
//! BigInt { negative, DigitBuffer }
//! ├── operand    any integer type → (sign, magnitude)
//! ├── magnitude  add / sub / mul / shifts on digit slices
//! ├── division   Knuth algorithm D with one-digit and 2^k fast paths
//! ├── radix      text in bases 2..=36, fmt traits
//! └── fraction   unevaluated n/d
//! ```
//!
//! # Errors
//!
//! `checked_*` methods return [`IntError`]; operators are their panicking
//! forms. Division by zero is always an error, never a silent zero.
//!
//! ```
//! use numcell_int::BigInt;
//!
//! let a: BigInt = "18446744073709551615".parse().unwrap();
//! let b = &a + 1u8;
//! assert_eq!(b.to_string_radix(16, 0), "10000000000000000");
//! assert_eq!(b.div_rem(&7), (BigInt::from(2635249153387078802u64), BigInt::from(2)));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bigint;
pub mod convert;
pub mod division;
pub mod error;
pub mod fraction;
pub mod magnitude;
pub mod operand;
mod ops;
pub mod radix;

pub use bigint::BigInt;
pub use error::{IntError, ParseBigIntError, ParseErrorKind, TryFromBigIntError};
pub use fraction::Fraction;
pub use numcell_digits::Digit;
pub use operand::{AsOperand, Magnitude, Normalized, Operand};
