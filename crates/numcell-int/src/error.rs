//! Error types for the arithmetic engine.

use std::error::Error;
use std::fmt;

use numcell_digits::DigitError;

/// Errors from big-integer arithmetic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IntError {
    /// Division, remainder, or reciprocal with a zero denominator.
    DivisionByZero,
    /// A result buffer could not be allocated. No operand was modified.
    Allocation(DigitError),
    /// A radix outside `2..=36` was requested for text conversion.
    InvalidRadix {
        /// The rejected radix.
        radix: u32,
    },
}

impl fmt::Display for IntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "attempt to divide by zero"),
            Self::Allocation(err) => write!(f, "big integer allocation failed: {err}"),
            Self::InvalidRadix { radix } => {
                write!(f, "radix must be in the range 2..=36, got {radix}")
            }
        }
    }
}

impl Error for IntError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Allocation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DigitError> for IntError {
    fn from(err: DigitError) -> Self {
        Self::Allocation(err)
    }
}

/// Why a string could not be parsed as a [`BigInt`](crate::BigInt).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// No digits were present (empty input, or only a sign/separators).
    Empty,
    /// A character is not a digit in the requested radix.
    InvalidDigit {
        /// Byte offset of the offending character.
        index: usize,
        /// The offending character.
        found: char,
    },
    /// The requested radix is outside `2..=36`.
    InvalidRadix {
        /// The rejected radix.
        radix: u32,
    },
    /// Storage for the parsed digits could not be allocated.
    Allocation(DigitError),
}

/// Error returned by [`BigInt::from_str_radix`](crate::BigInt::from_str_radix)
/// and the `FromStr` implementation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseBigIntError {
    kind: ParseErrorKind,
}

impl ParseBigIntError {
    pub(crate) fn new(kind: ParseErrorKind) -> Self {
        Self { kind }
    }

    /// The detailed cause.
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

impl fmt::Display for ParseBigIntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::Empty => write!(f, "cannot parse integer from empty string"),
            ParseErrorKind::InvalidDigit { index, found } => {
                write!(f, "invalid digit {found:?} at byte {index}")
            }
            ParseErrorKind::InvalidRadix { radix } => {
                write!(f, "radix must be in the range 2..=36, got {radix}")
            }
            ParseErrorKind::Allocation(err) => write!(f, "cannot parse integer: {err}"),
        }
    }
}

impl Error for ParseBigIntError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            ParseErrorKind::Allocation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DigitError> for ParseBigIntError {
    fn from(err: DigitError) -> Self {
        Self::new(ParseErrorKind::Allocation(err))
    }
}

/// A checked narrowing conversion found a value outside the target range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TryFromBigIntError {
    target: &'static str,
}

impl TryFromBigIntError {
    pub(crate) fn new(target: &'static str) -> Self {
        Self { target }
    }

    /// Name of the primitive type the conversion targeted.
    pub fn target(&self) -> &'static str {
        self.target
    }
}

impl fmt::Display for TryFromBigIntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "big integer out of range for {}", self.target)
    }
}

impl Error for TryFromBigIntError {}
