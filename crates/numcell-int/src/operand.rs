//! Operand normalisation for mixed arithmetic.
//!
//! Every right-hand side an operation accepts (primitive integers of any
//! width, a [`BigInt`], or a reference to one) is reduced to one of two
//! [`Operand`] variants and then to a `(sign, magnitude)` pair, so each
//! operation has exactly one arithmetic path.

use std::ops::Deref;

use numcell_digits::{Digit, DIGIT_BITS};
use smallvec::SmallVec;

use crate::bigint::BigInt;

/// A borrowed right-hand operand.
#[derive(Clone, Copy, Debug)]
pub enum Operand<'a> {
    /// A fixed-width integer widened to sign + 128-bit magnitude.
    Word {
        /// Whether the value is below zero.
        negative: bool,
        /// Absolute value.
        magnitude: u128,
    },
    /// An arbitrary-precision value.
    Big(&'a BigInt),
}

/// A magnitude that is either borrowed from a [`BigInt`] or held inline.
#[derive(Clone, Debug)]
pub enum Magnitude<'a> {
    /// Digits of an existing big integer.
    Borrowed(&'a [Digit]),
    /// Up to two digits of a widened fixed-width value.
    Inline(SmallVec<[Digit; 2]>),
}

impl Deref for Magnitude<'_> {
    type Target = [Digit];

    fn deref(&self) -> &[Digit] {
        match self {
            Self::Borrowed(digits) => digits,
            Self::Inline(digits) => digits,
        }
    }
}

/// An operand reduced to `(sign, canonical magnitude)`.
#[derive(Clone, Debug)]
pub struct Normalized<'a> {
    /// Whether the value is below zero. Never set for zero.
    pub negative: bool,
    /// Canonical magnitude digits.
    pub magnitude: Magnitude<'a>,
}

impl<'a> Operand<'a> {
    /// Reduce to sign and canonical magnitude.
    pub fn normalize(self) -> Normalized<'a> {
        match self {
            Self::Big(value) => Normalized {
                negative: value.is_negative(),
                magnitude: Magnitude::Borrowed(value.digits()),
            },
            Self::Word {
                negative,
                magnitude,
            } => {
                let mut digits = SmallVec::new();
                if magnitude != 0 {
                    digits.push(magnitude as Digit);
                    let high = (magnitude >> DIGIT_BITS) as Digit;
                    if high != 0 {
                        digits.push(high);
                    }
                }
                Normalized {
                    negative: negative && magnitude != 0,
                    magnitude: Magnitude::Inline(digits),
                }
            }
        }
    }

    /// Whether the operand is zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Word { magnitude, .. } => *magnitude == 0,
            Self::Big(value) => value.is_zero(),
        }
    }

    /// Materialise the operand as an owned big integer.
    ///
    /// A big operand is shared, not copied.
    pub fn to_bigint(self) -> BigInt {
        match self {
            Self::Big(value) => value.clone(),
            Self::Word {
                negative,
                magnitude,
            } => BigInt::from_u128_parts(negative, magnitude),
        }
    }
}

/// Types usable as the right-hand side of big-integer arithmetic.
pub trait AsOperand {
    /// Borrow `self` as an [`Operand`].
    fn as_operand(&self) -> Operand<'_>;
}

impl AsOperand for BigInt {
    fn as_operand(&self) -> Operand<'_> {
        Operand::Big(self)
    }
}

impl<T: AsOperand + ?Sized> AsOperand for &T {
    fn as_operand(&self) -> Operand<'_> {
        (**self).as_operand()
    }
}

macro_rules! impl_as_operand_unsigned {
    ($($t:ty),*) => {$(
        impl AsOperand for $t {
            fn as_operand(&self) -> Operand<'_> {
                Operand::Word {
                    negative: false,
                    magnitude: *self as u128,
                }
            }
        }
    )*};
}

macro_rules! impl_as_operand_signed {
    ($($t:ty),*) => {$(
        impl AsOperand for $t {
            fn as_operand(&self) -> Operand<'_> {
                Operand::Word {
                    negative: *self < 0,
                    magnitude: self.unsigned_abs() as u128,
                }
            }
        }
    )*};
}

impl_as_operand_unsigned!(u8, u16, u32, u64, u128, usize);
impl_as_operand_signed!(i8, i16, i32, i64, i128, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_normalise_to_inline_digits() {
        let n = (-5i32).as_operand().normalize();
        assert!(n.negative);
        assert_eq!(&*n.magnitude, &[5]);

        let n = u128::MAX.as_operand().normalize();
        assert!(!n.negative);
        assert_eq!(&*n.magnitude, &[Digit::MAX, Digit::MAX]);

        let n = 0i64.as_operand().normalize();
        assert!(!n.negative);
        assert!(n.magnitude.is_empty());
    }

    #[test]
    fn extreme_signed_values_keep_full_magnitude() {
        let n = i64::MIN.as_operand().normalize();
        assert!(n.negative);
        assert_eq!(&*n.magnitude, &[1 << 63]);

        let n = i128::MIN.as_operand().normalize();
        assert_eq!(&*n.magnitude, &[0, 1 << 63]);
    }

    #[test]
    fn big_operands_borrow_digits() {
        let value = BigInt::from(-(1i128 << 70));
        let n = (&value).as_operand().normalize();
        assert!(n.negative);
        assert!(matches!(n.magnitude, Magnitude::Borrowed(_)));
        assert_eq!(&*n.magnitude, value.digits());
    }

    #[test]
    fn to_bigint_round_trips() {
        assert_eq!(42u8.as_operand().to_bigint(), BigInt::from(42));
        assert!(0i32.as_operand().is_zero());
    }
}
