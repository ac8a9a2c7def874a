//! Truncating magnitude division.
//!
//! [`div_rem`] picks one of three paths:
//!
//! - **Power-of-two divisor:** quotient is a right shift, remainder a mask.
//! - **Single-digit divisor:** one top-down pass with a double-digit running
//!   remainder.
//! - **General:** schoolbook long division (Knuth, TAOCP vol. 2, 4.3.1,
//!   algorithm D). The divisor is normalised so its top bit is set, each
//!   quotient digit is estimated from the top two remainder digits and
//!   refined against the next divisor digit, then confirmed by a
//!   multiply-and-subtract that adds the divisor back at most once.

use std::cmp::Ordering;

use numcell_digits::{try_zeroed, Digit, DigitError, DoubleDigit, DIGIT_BITS};

use crate::error::IntError;
use crate::magnitude::{self, adc, mul_wide, sbb, to_vec, trim};

/// `(n / d, n % d)` for magnitudes, truncating.
///
/// Returns [`IntError::DivisionByZero`] when `d` is zero.
pub fn div_rem(n: &[Digit], d: &[Digit]) -> Result<(Vec<Digit>, Vec<Digit>), IntError> {
    if d.is_empty() {
        return Err(IntError::DivisionByZero);
    }
    if magnitude::compare(n, d) == Ordering::Less {
        return Ok((Vec::new(), to_vec(n)?));
    }
    if let Some(bits) = magnitude::power_of_two_exponent(d) {
        return Ok((magnitude::shr(n, bits)?, magnitude::low_bits(n, bits)?));
    }
    if let [divisor] = d {
        let mut quotient = to_vec(n)?;
        let remainder = div_rem_digit_in_place(&mut quotient, *divisor);
        let remainder = if remainder == 0 {
            Vec::new()
        } else {
            vec![remainder]
        };
        return Ok((trim(quotient), remainder));
    }
    Ok(long_divide(n, d)?)
}

/// Divide `digits` by a single nonzero digit in place, returning the
/// remainder. The quotient may be left with high zero digits.
pub(crate) fn div_rem_digit_in_place(digits: &mut [Digit], divisor: Digit) -> Digit {
    debug_assert!(divisor != 0);
    let divisor = DoubleDigit::from(divisor);
    let mut rem: DoubleDigit = 0;
    for d in digits.iter_mut().rev() {
        let current = (rem << DIGIT_BITS) | DoubleDigit::from(*d);
        *d = (current / divisor) as Digit;
        rem = current % divisor;
    }
    rem as Digit
}

/// Shift `src` left by `shift < DIGIT_BITS` bits into a vector one digit longer.
fn normalise(src: &[Digit], shift: u32) -> Result<Vec<Digit>, DigitError> {
    let mut out = try_zeroed(src.len() + 1)?;
    if shift == 0 {
        out[..src.len()].copy_from_slice(src);
        return Ok(out);
    }
    let mut carry: Digit = 0;
    for (i, &d) in src.iter().enumerate() {
        out[i] = (d << shift) | carry;
        carry = d >> (DIGIT_BITS - shift);
    }
    out[src.len()] = carry;
    Ok(out)
}

/// General long division; `d` has at least two digits and `n >= d`.
fn long_divide(n: &[Digit], d: &[Digit]) -> Result<(Vec<Digit>, Vec<Digit>), DigitError> {
    let shift = d[d.len() - 1].leading_zeros();
    let mut divisor = normalise(d, shift)?;
    divisor.truncate(d.len());
    let mut rem = normalise(n, shift)?;

    let dlen = divisor.len();
    let qlen = rem.len() - dlen;
    let mut quotient = try_zeroed(qlen)?;

    let top = DoubleDigit::from(divisor[dlen - 1]);
    let next = DoubleDigit::from(divisor[dlen - 2]);
    let base = DoubleDigit::from(Digit::MAX) + 1;

    for j in (0..qlen).rev() {
        // Invariant: rem[j + dlen] <= top digit of the divisor.
        let window = (DoubleDigit::from(rem[j + dlen]) << DIGIT_BITS)
            | DoubleDigit::from(rem[j + dlen - 1]);
        let mut qhat = window / top;
        let mut rhat = window % top;
        if qhat >= base {
            qhat = base - 1;
            rhat = window - qhat * top;
        }
        while rhat < base
            && qhat * next > ((rhat << DIGIT_BITS) | DoubleDigit::from(rem[j + dlen - 2]))
        {
            qhat -= 1;
            rhat += top;
        }
        let mut qdigit = qhat as Digit;

        let mut carry: Digit = 0;
        let mut borrow = false;
        for i in 0..dlen {
            let (high, low) = mul_wide(qdigit, divisor[i]);
            let (low, c) = low.overflowing_add(carry);
            carry = high + Digit::from(c);
            let (diff, b) = sbb(rem[j + i], low, borrow);
            rem[j + i] = diff;
            borrow = b;
        }
        let (diff, overshot) = sbb(rem[j + dlen], carry, borrow);
        rem[j + dlen] = diff;

        if overshot {
            qdigit -= 1;
            let mut carry = false;
            for i in 0..dlen {
                let (sum, c) = adc(rem[j + i], divisor[i], carry);
                rem[j + i] = sum;
                carry = c;
            }
            rem[j + dlen] = rem[j + dlen].wrapping_add(Digit::from(carry));
        }
        quotient[j] = qdigit;
    }

    rem.truncate(dlen);
    if shift > 0 {
        let mut high_bits: Digit = 0;
        for d in rem.iter_mut().rev() {
            let value = *d;
            *d = (value >> shift) | high_bits;
            high_bits = value << (DIGIT_BITS - shift);
        }
    }
    Ok((trim(quotient), trim(rem)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(n: &[Digit], d: &[Digit]) {
        let (q, r) = div_rem(n, d).unwrap();
        assert_eq!(magnitude::compare(&r, d), Ordering::Less, "remainder too large");
        let product = magnitude::mul(&q, d).unwrap();
        let back = magnitude::add(&product, &r).unwrap();
        assert_eq!(back, n.to_vec(), "q*d + r != n for n={n:?} d={d:?}");
    }

    #[test]
    fn zero_divisor_is_rejected() {
        assert_eq!(div_rem(&[1], &[]), Err(IntError::DivisionByZero));
    }

    #[test]
    fn smaller_numerator_is_all_remainder() {
        assert_eq!(div_rem(&[3], &[7]).unwrap(), (vec![], vec![3]));
        assert_eq!(div_rem(&[], &[7]).unwrap(), (vec![], vec![]));
    }

    #[test]
    fn ten_to_twenty_by_seven() {
        // 10^20 = 5 * 2^64 + 7766279631452241920
        let n = [7_766_279_631_452_241_920, 5];
        let (q, r) = div_rem(&n, &[7]).unwrap();
        assert_eq!(q, vec![14_285_714_285_714_285_714]);
        assert_eq!(r, vec![2]);
    }

    #[test]
    fn power_of_two_divisor_shifts_and_masks() {
        let (q, r) = div_rem(&[0b1_0111], &[4]).unwrap();
        assert_eq!(q, vec![0b101]);
        assert_eq!(r, vec![0b11]);

        let (q, r) = div_rem(&[5, 9], &[0, 1]).unwrap();
        assert_eq!(q, vec![9]);
        assert_eq!(r, vec![5]);
    }

    #[test]
    fn long_division_exact_and_inexact() {
        check(&[0, 0, 1], &[1, 1]);
        check(&[Digit::MAX, Digit::MAX, Digit::MAX], &[Digit::MAX, Digit::MAX]);
        check(&[12345, 0, 0, 1 << 63], &[3, 1 << 62]);
        check(&[1, 2, 3, 4, 5], &[7, 0, 9]);
        check(&[0, 0, 0x8000_0000_0000_0000], &[1, 0x8000_0000_0000_0000]);
    }

    #[test]
    fn long_division_needs_add_back() {
        // A classic add-back trigger: top digits make the estimate one too large.
        check(&[0, 0, 0x7fff_ffff_ffff_ffff, 0x8000_0000_0000_0000], &[1, 0, 0x8000_0000_0000_0000]);
        check(&[Digit::MAX, 0, Digit::MAX - 1], &[Digit::MAX, Digit::MAX]);
    }

    #[test]
    fn equal_operands_divide_to_one() {
        let (q, r) = div_rem(&[3, 5], &[3, 5]).unwrap();
        assert_eq!(q, vec![1]);
        assert!(r.is_empty());
    }

    #[test]
    fn single_digit_in_place_division() {
        let mut digits = [10, 1];
        let rem = div_rem_digit_in_place(&mut digits, 10);
        // (2^64 + 10) / 10 = 1844674407370955162 remainder 6
        assert_eq!(digits, [1_844_674_407_370_955_162, 0]);
        assert_eq!(rem, 6);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn div_rem_reconstructs_numerator(
                n in proptest::collection::vec(any::<u64>(), 0..8),
                d in proptest::collection::vec(any::<u64>(), 1..5),
            ) {
                let n = trim(n);
                let d = trim(d);
                prop_assume!(!d.is_empty());
                let (q, r) = div_rem(&n, &d).unwrap();
                prop_assert_eq!(magnitude::compare(&r, &d), Ordering::Less);
                let back = magnitude::add(&magnitude::mul(&q, &d).unwrap(), &r).unwrap();
                prop_assert_eq!(back, n);
            }
        }
    }
}
