//! Conversions between [`BigInt`] and the built-in integer types.
//!
//! Widening (`From`) is exact. Narrowing comes in two forms: the
//! `wrapping_to_*` accessors keep the low bits of the two's-complement
//! value and never fail, and `TryFrom<&BigInt>` rejects out-of-range values.

use numcell_digits::{Digit, DIGIT_BITS};

use crate::bigint::BigInt;
use crate::error::TryFromBigIntError;

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for BigInt {
            fn from(value: $t) -> Self {
                BigInt::from_u128_parts(false, value as u128)
            }
        }
    )*};
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for BigInt {
            fn from(value: $t) -> Self {
                BigInt::from_u128_parts(value < 0, value.unsigned_abs() as u128)
            }
        }
    )*};
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);
impl_from_signed!(i8, i16, i32, i64, i128, isize);

impl BigInt {
    /// The least significant magnitude digit (0 for zero). Sign is ignored.
    pub fn low_digit(&self) -> Digit {
        self.digits().first().copied().unwrap_or(0)
    }

    /// The magnitude if it fits in 128 bits.
    fn magnitude_u128(&self) -> Option<u128> {
        match self.digits() {
            [] => Some(0),
            [lo] => Some(u128::from(*lo)),
            [lo, hi] => Some((u128::from(*hi) << DIGIT_BITS) | u128::from(*lo)),
            _ => None,
        }
    }

    /// Low 128 bits of the two's-complement value.
    pub fn wrapping_to_u128(&self) -> u128 {
        let digits = self.digits();
        let lo = u128::from(digits.first().copied().unwrap_or(0));
        let hi = u128::from(digits.get(1).copied().unwrap_or(0));
        let magnitude = (hi << DIGIT_BITS) | lo;
        if self.is_negative() {
            magnitude.wrapping_neg()
        } else {
            magnitude
        }
    }

    /// Low 128 bits of the two's-complement value, as signed.
    pub fn wrapping_to_i128(&self) -> i128 {
        self.wrapping_to_u128() as i128
    }

    /// Low 64 bits of the two's-complement value.
    pub fn wrapping_to_u64(&self) -> u64 {
        self.wrapping_to_u128() as u64
    }

    /// Low 64 bits of the two's-complement value, as signed.
    pub fn wrapping_to_i64(&self) -> i64 {
        self.wrapping_to_u128() as i64
    }
}

impl TryFrom<&BigInt> for u128 {
    type Error = TryFromBigIntError;

    fn try_from(value: &BigInt) -> Result<Self, Self::Error> {
        match value.magnitude_u128() {
            Some(magnitude) if !value.is_negative() => Ok(magnitude),
            _ => Err(TryFromBigIntError::new("u128")),
        }
    }
}

impl TryFrom<&BigInt> for i128 {
    type Error = TryFromBigIntError;

    fn try_from(value: &BigInt) -> Result<Self, Self::Error> {
        let err = TryFromBigIntError::new("i128");
        let magnitude = value.magnitude_u128().ok_or(err)?;
        if value.is_negative() {
            if magnitude > i128::MIN.unsigned_abs() {
                return Err(err);
            }
            Ok(magnitude.wrapping_neg() as i128)
        } else {
            i128::try_from(magnitude).map_err(|_| err)
        }
    }
}

macro_rules! impl_try_from_narrow {
    ($wide:ty => $($t:ty),*) => {$(
        impl TryFrom<&BigInt> for $t {
            type Error = TryFromBigIntError;

            fn try_from(value: &BigInt) -> Result<Self, Self::Error> {
                let err = TryFromBigIntError::new(stringify!($t));
                let wide = <$wide>::try_from(value).map_err(|_| err)?;
                <$t>::try_from(wide).map_err(|_| err)
            }
        }
    )*};
}

impl_try_from_narrow!(u128 => u8, u16, u32, u64, usize);
impl_try_from_narrow!(i128 => i8, i16, i32, i64, isize);

macro_rules! impl_try_from_owned {
    ($($t:ty),*) => {$(
        impl TryFrom<BigInt> for $t {
            type Error = TryFromBigIntError;

            fn try_from(value: BigInt) -> Result<Self, Self::Error> {
                <$t>::try_from(&value)
            }
        }
    )*};
}

impl_try_from_owned!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widening_is_exact() {
        assert_eq!(BigInt::from(u128::MAX).digits(), &[u64::MAX, u64::MAX]);
        assert_eq!(BigInt::from(i64::MIN).digits(), &[1 << 63]);
        assert!(BigInt::from(i64::MIN).is_negative());
        assert!(BigInt::from(0i8).is_zero());
    }

    #[test]
    fn wrapping_narrowing_truncates() {
        let big = BigInt::from(u128::MAX) + 2;
        assert_eq!(big.wrapping_to_u64(), 1);
        assert_eq!(big.wrapping_to_u128(), 1);
        assert_eq!(BigInt::from(-1).wrapping_to_u64(), u64::MAX);
        assert_eq!(BigInt::from(-1).wrapping_to_i64(), -1);
        assert_eq!(BigInt::from(i128::MIN).wrapping_to_i128(), i128::MIN);
        assert_eq!(BigInt::from(-7).low_digit(), 7);
    }

    #[test]
    fn checked_narrowing_rejects_out_of_range() {
        assert_eq!(u64::try_from(&BigInt::from(u64::MAX)), Ok(u64::MAX));
        assert!(u64::try_from(&(BigInt::from(u64::MAX) + 1)).is_err());
        assert!(u64::try_from(&BigInt::from(-1)).is_err());
        assert_eq!(i64::try_from(&BigInt::from(i64::MIN)), Ok(i64::MIN));
        assert!(i64::try_from(&(BigInt::from(i64::MIN) - 1)).is_err());
        assert_eq!(i128::try_from(&BigInt::from(i128::MIN)), Ok(i128::MIN));
        assert!(i128::try_from(&(BigInt::from(i128::MIN) - 1)).is_err());
        assert!(i128::try_from(&BigInt::from(u128::MAX)).is_err());
        assert_eq!(u8::try_from(BigInt::from(255)), Ok(255));
        let err = u8::try_from(BigInt::from(256)).unwrap_err();
        assert_eq!(err.target(), "u8");
    }

    #[test]
    fn owned_wide_conversions_match_borrowed() {
        assert_eq!(u128::try_from(BigInt::from(u128::MAX)), Ok(u128::MAX));
        assert_eq!(i128::try_from(BigInt::from(i128::MIN)), Ok(i128::MIN));
        let err = u128::try_from(BigInt::from(-1)).unwrap_err();
        assert_eq!(err.target(), "u128");
        let err = i128::try_from(BigInt::from(u128::MAX)).unwrap_err();
        assert_eq!(err.target(), "i128");
        assert!(u128::try_from(BigInt::from(u128::MAX) + 1).is_err());
    }
}
