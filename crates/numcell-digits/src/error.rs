//! Digit-buffer error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur while growing or privately cloning a digit buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DigitError {
    /// The allocator could not provide storage for the requested digits.
    AllocationFailed {
        /// Total number of digits the buffer needed to hold.
        requested: usize,
    },
}

impl fmt::Display for DigitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { requested } => {
                write!(f, "digit allocation failed: requested {requested} digits")
            }
        }
    }
}

impl Error for DigitError {}
