//! The digit type and allocation helpers shared by the buffer and the engine.

use crate::error::DigitError;

/// One positional unit of a magnitude: an unsigned machine word.
pub type Digit = u64;

/// Twice the width of a [`Digit`]; holds any digit × digit product.
pub type DoubleDigit = u128;

/// Width of a [`Digit`] in bits. The magnitude base is `2^DIGIT_BITS`.
pub const DIGIT_BITS: u32 = Digit::BITS;

/// Length of `digits` once non-significant high zero digits are dropped.
///
/// The empty slice and an all-zero slice both have significant length 0.
pub fn significant_len(digits: &[Digit]) -> usize {
    digits.iter().rposition(|&d| d != 0).map_or(0, |i| i + 1)
}

/// Allocate a zero-filled digit vector, reporting failure instead of aborting.
pub fn try_zeroed(len: usize) -> Result<Vec<Digit>, DigitError> {
    let mut digits = Vec::new();
    reserve_exact(&mut digits, len)?;
    digits.resize(len, 0);
    Ok(digits)
}

/// Make room for `additional` more digits in `digits`.
///
/// On failure `digits` is untouched.
pub(crate) fn reserve_exact(digits: &mut Vec<Digit>, additional: usize) -> Result<(), DigitError> {
    digits
        .try_reserve_exact(additional)
        .map_err(|_| DigitError::AllocationFailed {
            requested: digits.len().saturating_add(additional),
        })
}
