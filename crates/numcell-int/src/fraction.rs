//! Unevaluated division results.

use std::fmt;

use crate::bigint::BigInt;
use crate::error::IntError;
use crate::operand::AsOperand;

/// An exact quotient `numerator / denominator` that has not been divided.
///
/// The denominator is never zero. Equality is numeric: `2/4 == -1/-2`.
#[derive(Clone)]
pub struct Fraction {
    numerator: BigInt,
    denominator: BigInt,
}

impl Fraction {
    /// Pair a numerator with a nonzero denominator.
    pub fn new(numerator: BigInt, denominator: BigInt) -> Result<Self, IntError> {
        if denominator.is_zero() {
            return Err(IntError::DivisionByZero);
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// The numerator as given.
    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    /// The denominator as given.
    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    /// Split into `(numerator, denominator)`.
    pub fn into_parts(self) -> (BigInt, BigInt) {
        (self.numerator, self.denominator)
    }

    /// Perform the truncating division, yielding `(quotient, remainder)`.
    pub fn evaluate(&self) -> Result<(BigInt, BigInt), IntError> {
        self.numerator.checked_div_rem(&self.denominator)
    }

    /// Lowest terms with a positive denominator.
    pub fn reduced(&self) -> Result<Self, IntError> {
        let divisor = self.numerator.gcd(&self.denominator)?;
        let mut numerator = self.numerator.checked_div(&divisor)?;
        let mut denominator = self.denominator.checked_div(&divisor)?;
        if denominator.is_negative() {
            numerator.negate();
            denominator.negate();
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        // a/b == c/d  <=>  a*d == c*b
        match (
            self.numerator.checked_mul(&other.denominator),
            other.numerator.checked_mul(&self.denominator),
        ) {
            (Ok(lhs), Ok(rhs)) => lhs == rhs,
            _ => false,
        }
    }
}

impl Eq for Fraction {}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl fmt::Debug for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fraction")
            .field("numerator", &self.numerator)
            .field("denominator", &self.denominator)
            .finish()
    }
}

impl BigInt {
    /// `self / rhs` as an unevaluated [`Fraction`].
    pub fn over<T: AsOperand + ?Sized>(&self, rhs: &T) -> Result<Fraction, IntError> {
        Fraction::new(self.clone(), rhs.as_operand().to_bigint())
    }

    /// `1 / self`. Fails with [`IntError::DivisionByZero`] for zero.
    pub fn reciprocal(&self) -> Result<Fraction, IntError> {
        Fraction::new(Self::one(), self.clone())
    }
}
