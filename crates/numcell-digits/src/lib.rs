//! Reference-counted, copy-on-write digit storage for numcell.
//!
//! A big integer's magnitude is a least-significant-first sequence of
//! machine-word [`Digit`]s. This crate owns that storage:
//!
//! ```text
//! DigitBuffer
//! └── Arc<Vec<Digit>>   shared on clone, privately cloned on mutation
//! ```
//!
//! Every operation that can allocate reserves its memory before touching a
//! single digit, so an allocation failure ([`DigitError`]) never leaves a
//! partially written buffer behind.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod digit;
pub mod error;

pub use buffer::DigitBuffer;
pub use digit::{significant_len, try_zeroed, Digit, DoubleDigit, DIGIT_BITS};
pub use error::DigitError;
