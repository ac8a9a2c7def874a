//! Unsigned magnitude algorithms over least-significant-first digit slices.
//!
//! Inputs are assumed canonical (no high zero digits; the empty slice is
//! zero). Every function that returns a new magnitude returns it canonical.
//! Results are written to freshly allocated vectors; operands are never
//! modified, so an allocation failure leaves nothing half-done.

use std::cmp::Ordering;

use numcell_digits::{significant_len, try_zeroed, Digit, DigitError, DoubleDigit, DIGIT_BITS};

/// Add with carry-in, returning `(sum, carry_out)`.
#[inline]
pub(crate) fn adc(a: Digit, b: Digit, carry: bool) -> (Digit, bool) {
    let (sum, c1) = a.overflowing_add(b);
    let (sum, c2) = sum.overflowing_add(Digit::from(carry));
    (sum, c1 | c2)
}

/// Subtract with borrow-in, returning `(difference, borrow_out)`.
#[inline]
pub(crate) fn sbb(a: Digit, b: Digit, borrow: bool) -> (Digit, bool) {
    let (diff, b1) = a.overflowing_sub(b);
    let (diff, b2) = diff.overflowing_sub(Digit::from(borrow));
    (diff, b1 | b2)
}

/// Widening digit × digit product as `(high, low)`.
#[inline]
pub(crate) fn mul_wide(a: Digit, b: Digit) -> (Digit, Digit) {
    let product = DoubleDigit::from(a) * DoubleDigit::from(b);
    ((product >> DIGIT_BITS) as Digit, product as Digit)
}

/// Drop high zero digits in place.
pub(crate) fn trim(mut digits: Vec<Digit>) -> Vec<Digit> {
    digits.truncate(significant_len(&digits));
    digits
}

/// Copy a magnitude into a fresh vector.
pub(crate) fn to_vec(digits: &[Digit]) -> Result<Vec<Digit>, DigitError> {
    let mut out = try_zeroed(digits.len())?;
    out.copy_from_slice(digits);
    Ok(out)
}

/// Compare two magnitudes: length first, then digits from the top down.
pub fn compare(a: &[Digit], b: &[Digit]) -> Ordering {
    a.len()
        .cmp(&b.len())
        .then_with(|| a.iter().rev().cmp(b.iter().rev()))
}

/// `a + b`, single ripple-carry pass.
pub fn add(a: &[Digit], b: &[Digit]) -> Result<Vec<Digit>, DigitError> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut out = try_zeroed(long.len() + 1)?;
    let mut carry = false;
    for (i, slot) in out.iter_mut().take(long.len()).enumerate() {
        let (sum, c) = adc(long[i], short.get(i).copied().unwrap_or(0), carry);
        *slot = sum;
        carry = c;
    }
    out[long.len()] = Digit::from(carry);
    Ok(trim(out))
}

/// `|a - b|`, single ripple-borrow pass.
///
/// The flag is `true` when `b` turned out to be the larger operand, i.e.
/// the signed result `a - b` is negative.
pub fn sub(a: &[Digit], b: &[Digit]) -> Result<(Vec<Digit>, bool), DigitError> {
    let flipped = compare(a, b) == Ordering::Less;
    let (large, small) = if flipped { (b, a) } else { (a, b) };
    let mut out = try_zeroed(large.len())?;
    let mut borrow = false;
    for (i, slot) in out.iter_mut().enumerate() {
        let (diff, b) = sbb(large[i], small.get(i).copied().unwrap_or(0), borrow);
        *slot = diff;
        borrow = b;
    }
    debug_assert!(!borrow, "larger magnitude minus smaller cannot borrow out");
    Ok((trim(out), flipped))
}

/// If the magnitude is exactly `2^k`, return `k`.
pub fn power_of_two_exponent(digits: &[Digit]) -> Option<u64> {
    let (&top, rest) = digits.split_last()?;
    if !top.is_power_of_two() || rest.iter().any(|&d| d != 0) {
        return None;
    }
    Some(rest.len() as u64 * u64::from(DIGIT_BITS) + u64::from(top.trailing_zeros()))
}

/// `a * b`.
///
/// When either operand is an exact power of two the product is computed as
/// a left shift of the other operand instead of a full multiplication.
pub fn mul(a: &[Digit], b: &[Digit]) -> Result<Vec<Digit>, DigitError> {
    if a.is_empty() || b.is_empty() {
        return Ok(Vec::new());
    }
    if let Some(bits) = power_of_two_exponent(b) {
        return shl(a, bits);
    }
    if let Some(bits) = power_of_two_exponent(a) {
        return shl(b, bits);
    }
    let mut out = try_zeroed(a.len() + b.len())?;
    for (i, &x) in a.iter().enumerate() {
        let mut carry: Digit = 0;
        for (j, &y) in b.iter().enumerate() {
            let (high, low) = mul_wide(x, y);
            let (sum, c1) = out[i + j].overflowing_add(low);
            let (sum, c2) = sum.overflowing_add(carry);
            out[i + j] = sum;
            // out + x*y + carry always fits in two digits.
            carry = high + Digit::from(c1) + Digit::from(c2);
        }
        out[i + b.len()] = carry;
    }
    Ok(trim(out))
}

/// Split a bit count into whole digits and leftover bits.
fn split_shift(bits: u64) -> Result<(usize, u32), DigitError> {
    let digits = usize::try_from(bits / u64::from(DIGIT_BITS)).map_err(|_| {
        DigitError::AllocationFailed {
            requested: usize::MAX,
        }
    })?;
    Ok((digits, (bits % u64::from(DIGIT_BITS)) as u32))
}

/// `a << bits`.
pub fn shl(a: &[Digit], bits: u64) -> Result<Vec<Digit>, DigitError> {
    if a.is_empty() {
        return Ok(Vec::new());
    }
    let (digit_shift, bit_shift) = split_shift(bits)?;
    let len = digit_shift
        .checked_add(a.len() + 1)
        .ok_or(DigitError::AllocationFailed {
            requested: usize::MAX,
        })?;
    let mut out = try_zeroed(len)?;
    if bit_shift == 0 {
        out[digit_shift..digit_shift + a.len()].copy_from_slice(a);
    } else {
        let mut carry: Digit = 0;
        for (i, &d) in a.iter().enumerate() {
            out[digit_shift + i] = (d << bit_shift) | carry;
            carry = d >> (DIGIT_BITS - bit_shift);
        }
        out[digit_shift + a.len()] = carry;
    }
    Ok(trim(out))
}

/// `a >> bits`, discarding the shifted-out low bits.
pub fn shr(a: &[Digit], bits: u64) -> Result<Vec<Digit>, DigitError> {
    let (digit_shift, bit_shift) = match split_shift(bits) {
        Ok(split) => split,
        Err(_) => return Ok(Vec::new()),
    };
    if digit_shift >= a.len() {
        return Ok(Vec::new());
    }
    let src = &a[digit_shift..];
    let mut out = try_zeroed(src.len())?;
    if bit_shift == 0 {
        out.copy_from_slice(src);
    } else {
        for (i, slot) in out.iter_mut().enumerate() {
            let high = src.get(i + 1).map_or(0, |&d| d << (DIGIT_BITS - bit_shift));
            *slot = (src[i] >> bit_shift) | high;
        }
    }
    Ok(trim(out))
}

/// The low `bits` bits of `a` (i.e. `a mod 2^bits`).
pub fn low_bits(a: &[Digit], bits: u64) -> Result<Vec<Digit>, DigitError> {
    let (digit_shift, bit_shift) = match split_shift(bits) {
        Ok(split) => split,
        Err(_) => return to_vec(a),
    };
    if digit_shift >= a.len() {
        return to_vec(a);
    }
    let keep = digit_shift + usize::from(bit_shift != 0);
    let mut out = to_vec(&a[..keep])?;
    if bit_shift != 0 {
        out[digit_shift] &= Digit::MAX >> (DIGIT_BITS - bit_shift);
    }
    Ok(trim(out))
}

/// Number of significant bits; 0 for zero.
pub fn bit_length(a: &[Digit]) -> u64 {
    match a.last() {
        None => 0,
        Some(&top) => {
            a.len() as u64 * u64::from(DIGIT_BITS) - u64::from(top.leading_zeros())
        }
    }
}

/// Index of the lowest set bit, or `None` for zero.
pub fn trailing_zeros(a: &[Digit]) -> Option<u64> {
    let index = a.iter().position(|&d| d != 0)?;
    Some(index as u64 * u64::from(DIGIT_BITS) + u64::from(a[index].trailing_zeros()))
}

/// Add one to a magnitude in place, returning the carry out of the top digit.
pub fn increment(digits: &mut [Digit]) -> bool {
    for d in digits.iter_mut() {
        let (sum, carry) = d.overflowing_add(1);
        *d = sum;
        if !carry {
            return false;
        }
    }
    true
}

/// Subtract one from a nonzero magnitude in place.
///
/// The result may carry a high zero digit; the caller trims it.
pub fn decrement(digits: &mut [Digit]) {
    for d in digits.iter_mut() {
        let (diff, borrow) = d.overflowing_sub(1);
        *d = diff;
        if !borrow {
            return;
        }
    }
}

/// `digits = digits * factor + addend`, growing by at most one digit.
pub(crate) fn mul_add_digit(
    digits: &mut Vec<Digit>,
    factor: Digit,
    addend: Digit,
) -> Result<(), DigitError> {
    let mut carry = addend;
    for d in digits.iter_mut() {
        let wide = DoubleDigit::from(*d) * DoubleDigit::from(factor) + DoubleDigit::from(carry);
        *d = wide as Digit;
        carry = (wide >> DIGIT_BITS) as Digit;
    }
    if carry != 0 {
        digits
            .try_reserve(1)
            .map_err(|_| DigitError::AllocationFailed {
                requested: digits.len() + 1,
            })?;
        digits.push(carry);
    }
    Ok(())
}
