//! `i128` reference model.
//!
//! For operands drawn from `i64`, every engine operation has an exact
//! `i128` counterpart. Operations return `None` where the engine reports
//! an error (division by zero).

use numcell_int::BigInt;

/// Mirrors engine operations on `i128`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReferenceModel(pub i128);

impl ReferenceModel {
    pub fn of(value: &BigInt) -> Self {
        Self(i128::try_from(value).expect("reference model value out of range"))
    }

    pub fn to_bigint(self) -> BigInt {
        BigInt::from(self.0)
    }

    pub fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }

    pub fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }

    pub fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }

    /// Truncating division, as the engine does.
    pub fn div_rem(self, rhs: Self) -> Option<(Self, Self)> {
        if rhs.0 == 0 {
            return None;
        }
        Some((Self(self.0 / rhs.0), Self(self.0 % rhs.0)))
    }

    pub fn gcd(self, rhs: Self) -> Self {
        let (mut a, mut b) = (self.0.unsigned_abs(), rhs.0.unsigned_abs());
        while b != 0 {
            (a, b) = (b, a % b);
        }
        Self(a as i128)
    }

    pub fn lcm(self, rhs: Self) -> Self {
        if self.0 == 0 || rhs.0 == 0 {
            return Self(0);
        }
        let g = self.gcd(rhs).0;
        Self((self.0 / g * rhs.0).abs())
    }

    /// Text in `radix`, uppercase, no padding.
    pub fn to_string_radix(self, radix: u32) -> String {
        let mut magnitude = self.0.unsigned_abs();
        if magnitude == 0 {
            return "0".to_owned();
        }
        let mut out = Vec::new();
        while magnitude > 0 {
            let d = (magnitude % u128::from(radix)) as u32;
            out.push(std::char::from_digit(d, radix).expect("radix in range").to_ascii_uppercase());
            magnitude /= u128::from(radix);
        }
        if self.0 < 0 {
            out.push('-');
        }
        out.iter().rev().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_matches_known_values() {
        let a = ReferenceModel(-7);
        let b = ReferenceModel(2);
        assert_eq!(a.div_rem(b), Some((ReferenceModel(-3), ReferenceModel(-1))));
        assert_eq!(a.div_rem(ReferenceModel(0)), None);
        assert_eq!(ReferenceModel(12).gcd(ReferenceModel(-18)), ReferenceModel(6));
        assert_eq!(ReferenceModel(4).lcm(ReferenceModel(-6)), ReferenceModel(12));
        assert_eq!(ReferenceModel(-255).to_string_radix(16), "-FF");
    }
}
