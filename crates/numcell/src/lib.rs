//! numcell: arbitrary-precision signed integers and a lock-free cell to
//! share them between threads.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the numcell sub-crates. Adding `numcell` as a single dependency is
//! enough for most users.
//!
//! # Quick start
//!
//! ```rust
//! use numcell::prelude::*;
//!
//! let big: BigInt = "340282366920938463463374607431768211456".parse().unwrap();
//! let (q, r) = big.div_rem(&10u8);
//! assert_eq!(r, 6);
//! assert_eq!(q.to_string_radix(16, 0), "19999999999999999999999999999999");
//!
//! let counter = AtomicBigInt::new(big);
//! counter.fetch_add(&-1).unwrap();
//! assert_eq!(counter.load().bit_length(), 128);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`digits`] | `numcell-digits` | `DigitBuffer`, digit aliases |
//! | [`int`] | `numcell-int` | `BigInt`, operands, radix text, `Fraction` |
//! | [`atomic`] | `numcell-atomic` | `AtomicBigInt`, cell config and stats |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Copy-on-write digit storage (`numcell-digits`).
pub use numcell_digits as digits;

/// The arithmetic engine (`numcell-int`).
///
/// [`int::BigInt`] and every operation on it; [`int::AsOperand`] lets any
/// built-in integer appear as a right-hand operand.
pub use numcell_int as int;

/// The concurrent cell (`numcell-atomic`).
///
/// [`atomic::AtomicBigInt`] with its [`atomic::CellConfig`] and
/// [`atomic::CellStats`].
pub use numcell_atomic as atomic;

/// Common imports for typical numcell usage.
///
/// ```rust
/// use numcell::prelude::*;
/// ```
pub mod prelude {
    // Engine
    pub use numcell_int::{AsOperand, BigInt, Fraction};

    // Errors
    pub use numcell_atomic::CellError;
    pub use numcell_int::{IntError, ParseBigIntError};

    // Cell
    pub use numcell_atomic::{AtomicBigInt, CellConfig, CellStats};
}
