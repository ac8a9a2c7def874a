//! The [`BigInt`] value type and its signed arithmetic.
//!
//! A `BigInt` is a sign flag plus a canonical magnitude held in a shared
//! [`DigitBuffer`]. Cloning shares the buffer; every operation below builds
//! its result in fresh storage, except in-place increment/decrement which
//! copy-on-write first. Signed rules:
//!
//! - same signs add magnitudes and keep the sign;
//! - different signs subtract the smaller magnitude from the larger and take
//!   the larger operand's sign;
//! - products and quotients take the XOR of the operand signs;
//! - remainders take the numerator's sign (truncating division);
//! - zero is never negative.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use numcell_digits::{significant_len, Digit, DigitBuffer, DIGIT_BITS};

use crate::division;
use crate::error::IntError;
use crate::magnitude;
use crate::operand::{AsOperand, Normalized};

/// An arbitrary-precision signed integer.
#[derive(Clone, Default)]
pub struct BigInt {
    negative: bool,
    digits: DigitBuffer,
}

// Compile-time assertion: BigInt must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<BigInt>();
};

impl BigInt {
    /// Zero.
    pub fn zero() -> Self {
        Self::default()
    }

    /// One.
    pub fn one() -> Self {
        Self::from_magnitude(false, vec![1])
    }

    /// Minus one.
    pub fn minus_one() -> Self {
        Self::from_magnitude(true, vec![1])
    }

    /// Build from a sign and least-significant-first digits.
    ///
    /// High zero digits are dropped and the sign of zero is cleared.
    pub fn from_digits(negative: bool, digits: &[Digit]) -> Result<Self, IntError> {
        let len = significant_len(digits);
        let buffer = DigitBuffer::try_from_slice(&digits[..len])?;
        Ok(Self::from_canonical(negative, buffer))
    }

    /// Build from a sign and an existing buffer, canonicalising it.
    pub fn from_buffer(negative: bool, mut digits: DigitBuffer) -> Result<Self, IntError> {
        digits.truncate_to_significant()?;
        Ok(Self::from_canonical(negative, digits))
    }

    /// Wrap a magnitude vector, trimming it.
    pub(crate) fn from_magnitude(negative: bool, digits: Vec<Digit>) -> Self {
        Self::from_canonical(negative, DigitBuffer::from_vec(magnitude::trim(digits)))
    }

    pub(crate) fn from_u128_parts(negative: bool, magnitude: u128) -> Self {
        Self::from_magnitude(
            negative,
            vec![magnitude as Digit, (magnitude >> DIGIT_BITS) as Digit],
        )
    }

    fn from_canonical(negative: bool, digits: DigitBuffer) -> Self {
        debug_assert!(digits.last() != Some(&0), "magnitude must be canonical");
        Self {
            negative: negative && !digits.is_empty(),
            digits,
        }
    }

    /// Whether the value is zero.
    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// Whether the value is below zero.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Whether the value is above zero.
    pub fn is_positive(&self) -> bool {
        !self.negative && !self.is_zero()
    }

    /// `-1`, `0`, or `1` according to the sign.
    pub fn signum(&self) -> i32 {
        match (self.negative, self.is_zero()) {
            (_, true) => 0,
            (true, false) => -1,
            (false, false) => 1,
        }
    }

    /// Canonical magnitude digits, least significant first.
    pub fn digits(&self) -> &[Digit] {
        &self.digits
    }

    /// The shared buffer holding the magnitude.
    pub fn buffer(&self) -> &DigitBuffer {
        &self.digits
    }

    /// Split into sign and magnitude buffer.
    pub fn into_parts(self) -> (bool, DigitBuffer) {
        (self.negative, self.digits)
    }

    /// Number of bits in the magnitude; 0 for zero.
    pub fn bit_length(&self) -> u64 {
        magnitude::bit_length(&self.digits)
    }

    /// Index of the lowest set bit of the magnitude, or `None` for zero.
    pub fn trailing_zeros(&self) -> Option<u64> {
        magnitude::trailing_zeros(&self.digits)
    }

    /// Whether the magnitude is an exact power of two.
    pub fn is_power_of_two(&self) -> bool {
        magnitude::power_of_two_exponent(&self.digits).is_some()
    }

    /// Whether the value is odd.
    pub fn is_odd(&self) -> bool {
        self.digits.first().is_some_and(|&d| d & 1 == 1)
    }

    /// Whether the value is even.
    pub fn is_even(&self) -> bool {
        !self.is_odd()
    }

    /// Absolute value. Shares the magnitude buffer.
    pub fn abs(&self) -> Self {
        Self {
            negative: false,
            digits: self.digits.clone(),
        }
    }

    /// Flip the sign in place. Zero stays non-negative.
    pub fn negate(&mut self) {
        self.negative = !self.negative && !self.is_zero();
    }

    /// This value as a normalised operand.
    pub(crate) fn normalized(&self) -> Normalized<'_> {
        self.as_operand().normalize()
    }

    // ── Comparison ─────────────────────────────────────────────────

    /// Three-way comparison against any operand.
    pub fn cmp_operand<T: AsOperand + ?Sized>(&self, rhs: &T) -> Ordering {
        let rhs = rhs.as_operand().normalize();
        match (self.negative, rhs.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => magnitude::compare(&self.digits, &rhs.magnitude),
            (true, true) => magnitude::compare(&rhs.magnitude, &self.digits),
        }
    }

    // ── Add / subtract ─────────────────────────────────────────────

    /// `self + rhs`.
    pub fn checked_add<T: AsOperand + ?Sized>(&self, rhs: &T) -> Result<Self, IntError> {
        let rhs = rhs.as_operand().normalize();
        add_signed(self.normalized(), rhs.negative, &rhs.magnitude)
    }

    /// `self - rhs`.
    pub fn checked_sub<T: AsOperand + ?Sized>(&self, rhs: &T) -> Result<Self, IntError> {
        let rhs = rhs.as_operand().normalize();
        add_signed(self.normalized(), !rhs.negative, &rhs.magnitude)
    }

    // ── Multiply ───────────────────────────────────────────────────

    /// `self * rhs`.
    pub fn checked_mul<T: AsOperand + ?Sized>(&self, rhs: &T) -> Result<Self, IntError> {
        let rhs = rhs.as_operand().normalize();
        if self.is_zero() || rhs.magnitude.is_empty() {
            return Ok(Self::zero());
        }
        let negative = self.negative != rhs.negative;
        if *rhs.magnitude == [1] {
            return Ok(Self {
                negative,
                digits: self.digits.clone(),
            });
        }
        let product = magnitude::mul(&self.digits, &rhs.magnitude)?;
        Ok(Self::from_magnitude(negative, product))
    }

    /// `self` raised to `exp`, by square-and-multiply. `x^0` is 1.
    pub fn checked_pow(&self, exp: u32) -> Result<Self, IntError> {
        let negative = self.negative && exp % 2 == 1;
        if exp == 0 {
            return Ok(Self::one());
        }
        if self.is_zero() {
            return Ok(Self::zero());
        }
        let mut result = vec![1];
        let mut base = magnitude::to_vec(&self.digits)?;
        let mut remaining = exp;
        loop {
            if remaining & 1 == 1 {
                result = magnitude::mul(&result, &base)?;
            }
            remaining >>= 1;
            if remaining == 0 {
                break;
            }
            base = magnitude::mul(&base, &base)?;
        }
        Ok(Self::from_magnitude(negative, result))
    }

    // ── Divide ─────────────────────────────────────────────────────

    /// Truncating `(self / rhs, self % rhs)`.
    ///
    /// The quotient rounds toward zero; the remainder has the sign of
    /// `self` and a smaller magnitude than `rhs`.
    pub fn checked_div_rem<T: AsOperand + ?Sized>(
        &self,
        rhs: &T,
    ) -> Result<(Self, Self), IntError> {
        let rhs = rhs.as_operand().normalize();
        let (quotient, remainder) = division::div_rem(&self.digits, &rhs.magnitude)?;
        Ok((
            Self::from_magnitude(self.negative != rhs.negative, quotient),
            Self::from_magnitude(self.negative, remainder),
        ))
    }

    /// Truncating `self / rhs`.
    pub fn checked_div<T: AsOperand + ?Sized>(&self, rhs: &T) -> Result<Self, IntError> {
        self.checked_div_rem(rhs).map(|(q, _)| q)
    }

    /// Truncating `self % rhs`; the result has the sign of `self`.
    pub fn checked_rem<T: AsOperand + ?Sized>(&self, rhs: &T) -> Result<Self, IntError> {
        self.checked_div_rem(rhs).map(|(_, r)| r)
    }

    /// Truncating `(self / rhs, self % rhs)`.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    pub fn div_rem<T: AsOperand + ?Sized>(&self, rhs: &T) -> (Self, Self) {
        crate::ops::expect_arith(self.checked_div_rem(rhs))
    }

    // ── GCD / LCM ──────────────────────────────────────────────────

    /// Greatest common divisor, always non-negative. `gcd(0, 0)` is 0.
    pub fn gcd<T: AsOperand + ?Sized>(&self, rhs: &T) -> Result<Self, IntError> {
        let rhs = rhs.as_operand().normalize();
        let mut a = magnitude::to_vec(&self.digits)?;
        let mut b = magnitude::to_vec(&rhs.magnitude)?;
        while !b.is_empty() {
            let (_, r) = division::div_rem(&a, &b)?;
            a = std::mem::replace(&mut b, r);
        }
        Ok(Self::from_magnitude(false, a))
    }

    /// Least common multiple, always non-negative; 0 if either side is 0.
    pub fn lcm<T: AsOperand + ?Sized>(&self, rhs: &T) -> Result<Self, IntError> {
        let rhs_norm = rhs.as_operand().normalize();
        if self.is_zero() || rhs_norm.magnitude.is_empty() {
            return Ok(Self::zero());
        }
        let gcd = self.gcd(rhs)?;
        let product = magnitude::mul(&self.digits, &rhs_norm.magnitude)?;
        let (lcm, _) = division::div_rem(&product, &gcd.digits)?;
        Ok(Self::from_magnitude(false, lcm))
    }

    // ── Increment / decrement ──────────────────────────────────────

    /// Add one in place.
    pub fn increment(&mut self) -> Result<(), IntError> {
        if self.negative {
            self.step_toward_zero()
        } else {
            self.step_away_from_zero()
        }
    }

    /// Subtract one in place.
    pub fn decrement(&mut self) -> Result<(), IntError> {
        if self.negative || self.is_zero() {
            self.step_away_from_zero()?;
            self.negative = true;
            Ok(())
        } else {
            self.step_toward_zero()
        }
    }

    /// Magnitude + 1. Any growth is reserved before a digit changes.
    fn step_away_from_zero(&mut self) -> Result<(), IntError> {
        if self.digits.iter().all(|&d| d == Digit::MAX) {
            self.digits.push(0)?;
        }
        let carry = magnitude::increment(self.digits.mutate()?);
        debug_assert!(!carry);
        Ok(())
    }

    /// Magnitude - 1 on a nonzero magnitude.
    fn step_toward_zero(&mut self) -> Result<(), IntError> {
        magnitude::decrement(self.digits.mutate()?);
        self.digits.truncate_to_significant()?;
        if self.digits.is_empty() {
            self.negative = false;
        }
        Ok(())
    }

    // ── Shifts ─────────────────────────────────────────────────────

    /// `self * 2^bits`.
    pub fn checked_shl(&self, bits: u64) -> Result<Self, IntError> {
        let shifted = magnitude::shl(&self.digits, bits)?;
        Ok(Self::from_magnitude(self.negative, shifted))
    }

    /// `self / 2^bits`, truncating toward zero.
    pub fn checked_shr(&self, bits: u64) -> Result<Self, IntError> {
        let shifted = magnitude::shr(&self.digits, bits)?;
        Ok(Self::from_magnitude(self.negative, shifted))
    }
}

/// Signed addition of `lhs` and `(rhs_negative, rhs)`.
fn add_signed(
    lhs: Normalized<'_>,
    rhs_negative: bool,
    rhs: &[Digit],
) -> Result<BigInt, IntError> {
    if rhs.is_empty() {
        return Ok(BigInt::from_canonical(
            lhs.negative,
            DigitBuffer::try_from_slice(&lhs.magnitude)?,
        ));
    }
    if lhs.magnitude.is_empty() {
        return Ok(BigInt::from_canonical(
            rhs_negative,
            DigitBuffer::try_from_slice(rhs)?,
        ));
    }
    if lhs.negative == rhs_negative {
        let sum = magnitude::add(&lhs.magnitude, rhs)?;
        return Ok(BigInt::from_magnitude(lhs.negative, sum));
    }
    let (difference, flipped) = magnitude::sub(&lhs.magnitude, rhs)?;
    let negative = if flipped { rhs_negative } else { lhs.negative };
    Ok(BigInt::from_magnitude(negative, difference))
}

impl PartialEq for BigInt {
    fn eq(&self, other: &Self) -> bool {
        self.negative == other.negative && self.digits() == other.digits()
    }
}

impl Eq for BigInt {}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_operand(other)
    }
}

impl Hash for BigInt {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.negative.hash(state);
        self.digits().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(v: i128) -> BigInt {
        BigInt::from(v)
    }

    #[test]
    fn zero_is_never_negative() {
        let z = BigInt::from_digits(true, &[0, 0]).unwrap();
        assert!(z.is_zero());
        assert!(!z.is_negative());
        assert_eq!(z.signum(), 0);

        let mut z = BigInt::zero();
        z.negate();
        assert!(!z.is_negative());
    }

    #[test]
    fn from_digits_trims() {
        let v = BigInt::from_digits(false, &[5, 0, 0]).unwrap();
        assert_eq!(v.digits(), &[5]);
        let v = BigInt::from_buffer(true, DigitBuffer::from_vec(vec![0, 2, 0])).unwrap();
        assert_eq!(v.digits(), &[0, 2]);
        assert!(v.is_negative());
    }

    #[test]
    fn add_carries_into_new_digit() {
        let a = BigInt::from(u64::MAX);
        let sum = a.checked_add(&1).unwrap();
        assert_eq!(sum.digits(), &[0, 1]);
        assert_eq!(sum, big(18_446_744_073_709_551_616));
    }

    #[test]
    fn subtract_crossing_zero() {
        assert_eq!(big(5).checked_sub(&9).unwrap(), big(-4));
        assert_eq!(big(-5).checked_sub(&-9).unwrap(), big(4));
        assert_eq!(big(7).checked_sub(&7).unwrap(), BigInt::zero());
        assert!(!big(-7).checked_add(&7).unwrap().is_negative());
    }

    #[test]
    fn mixed_sign_addition_takes_larger_sign() {
        assert_eq!(big(-10).checked_add(&3).unwrap(), big(-7));
        assert_eq!(big(10).checked_add(&-3).unwrap(), big(7));
        assert_eq!(big(3).checked_add(&-10).unwrap(), big(-7));
    }

    #[test]
    fn multiply_signs_and_identities() {
        assert_eq!(big(123_456_789).checked_mul(&1024).unwrap(), big(126_419_751_936));
        assert_eq!(big(-6).checked_mul(&7).unwrap(), big(-42));
        assert_eq!(big(-6).checked_mul(&-7).unwrap(), big(42));
        assert_eq!(big(-6).checked_mul(&0).unwrap(), BigInt::zero());
        assert!(!big(-6).checked_mul(&0).unwrap().is_negative());
        assert_eq!(big(-6).checked_mul(&-1).unwrap(), big(6));
    }

    #[test]
    fn multiply_by_one_shares_buffer() {
        let a = big(1 << 100);
        let b = a.checked_mul(&1).unwrap();
        assert!(DigitBuffer::ptr_eq(a.buffer(), b.buffer()));
    }

    #[test]
    fn truncating_division_signs() {
        let cases = [(7, 2), (-7, 2), (7, -2), (-7, -2), (6, 3), (-1, 5)];
        for (n, d) in cases {
            let (q, r) = big(n).checked_div_rem(&d).unwrap();
            assert_eq!(q, big(n / d), "{n} / {d}");
            assert_eq!(r, big(n % d), "{n} % {d}");
        }
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(big(1).checked_div(&0), Err(IntError::DivisionByZero));
        assert_eq!(big(0).checked_rem(&BigInt::zero()), Err(IntError::DivisionByZero));
    }

    #[test]
    #[should_panic(expected = "attempt to divide by zero")]
    fn div_rem_panics_on_zero() {
        let _ = big(1).div_rem(&0);
    }

    #[test]
    fn gcd_and_lcm_examples() {
        assert_eq!(big(48).gcd(&18).unwrap(), big(6));
        assert_eq!(big(48).lcm(&18).unwrap(), big(144));
        assert_eq!(big(-48).gcd(&18).unwrap(), big(6));
        assert_eq!(big(-4).lcm(&6).unwrap(), big(12));
        assert_eq!(big(0).gcd(&-9).unwrap(), big(9));
        assert_eq!(big(0).gcd(&0).unwrap(), BigInt::zero());
        assert_eq!(big(12).lcm(&0).unwrap(), BigInt::zero());
    }

    #[test]
    fn pow_by_squaring() {
        assert_eq!(big(3).checked_pow(0).unwrap(), big(1));
        assert_eq!(big(0).checked_pow(0).unwrap(), big(1));
        assert_eq!(big(-2).checked_pow(3).unwrap(), big(-8));
        assert_eq!(big(-2).checked_pow(4).unwrap(), big(16));
        assert_eq!(big(10).checked_pow(20).unwrap(), big(100_000_000_000_000_000_000));
    }

    #[test]
    fn increment_and_decrement_cross_zero_and_digits() {
        let mut v = big(-1);
        v.increment().unwrap();
        assert_eq!(v, BigInt::zero());
        assert!(!v.is_negative());
        v.decrement().unwrap();
        assert_eq!(v, big(-1));

        let mut v = BigInt::from(u64::MAX);
        v.increment().unwrap();
        assert_eq!(v.digits(), &[0, 1]);
        v.decrement().unwrap();
        assert_eq!(v.digits(), &[u64::MAX]);

        let mut v = big(-(1i128 << 64));
        v.increment().unwrap();
        assert_eq!(v, big(-(u64::MAX as i128)));
    }

    #[test]
    fn increment_copies_on_write() {
        let a = big(41);
        let mut b = a.clone();
        assert!(DigitBuffer::ptr_eq(a.buffer(), b.buffer()));
        b.increment().unwrap();
        assert_eq!(a, big(41));
        assert_eq!(b, big(42));
    }

    #[test]
    fn shifts_keep_sign_and_truncate_toward_zero() {
        assert_eq!(big(-3).checked_shl(65).unwrap(), big(-3 * (1i128 << 65)));
        assert_eq!(big(-7).checked_shr(1).unwrap(), big(-3));
        assert_eq!(big(-1).checked_shr(1).unwrap(), BigInt::zero());
    }

    #[test]
    fn bit_queries() {
        assert_eq!(big(0).bit_length(), 0);
        assert_eq!(big(-255).bit_length(), 8);
        assert!(big(-1024).is_power_of_two());
        assert!(!big(1023).is_power_of_two());
        assert_eq!(big(96).trailing_zeros(), Some(5));
        assert!(big(-3).is_odd());
        assert!(big(0).is_even());
    }

    #[test]
    fn ordering_across_signs_and_lengths() {
        let values = [big(-(1 << 80)), big(-5), big(0), big(3), big(1 << 70)];
        for (i, a) in values.iter().enumerate() {
            for (j, b) in values.iter().enumerate() {
                assert_eq!(a.cmp(b), i.cmp(&j));
            }
        }
    }
}
