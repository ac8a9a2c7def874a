//! `std::ops` and comparison impls.
//!
//! Operators are the panicking forms of the `checked_*` methods: division
//! or remainder by zero panics with `attempt to divide by zero`, and an
//! allocation failure panics with its message. Any [`AsOperand`] type can
//! appear on the right; the built-in integer types can also appear on the
//! left.

use std::cmp::Ordering;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Shl, ShlAssign, Shr,
    ShrAssign, Sub, SubAssign,
};

use crate::bigint::BigInt;
use crate::error::IntError;
use crate::operand::AsOperand;

/// Unwrap an arithmetic result, panicking with the error's message.
#[track_caller]
pub(crate) fn expect_arith<T>(result: Result<T, IntError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $checked:ident) => {
        impl<T: AsOperand> $trait<T> for &BigInt {
            type Output = BigInt;

            #[track_caller]
            fn $method(self, rhs: T) -> BigInt {
                expect_arith(self.$checked(&rhs))
            }
        }

        impl<T: AsOperand> $trait<T> for BigInt {
            type Output = BigInt;

            #[track_caller]
            fn $method(self, rhs: T) -> BigInt {
                expect_arith(self.$checked(&rhs))
            }
        }

        impl<T: AsOperand> $assign_trait<T> for BigInt {
            #[track_caller]
            fn $assign_method(&mut self, rhs: T) {
                *self = expect_arith(self.$checked(&rhs));
            }
        }
    };
}

impl_binary_op!(Add, add, AddAssign, add_assign, checked_add);
impl_binary_op!(Sub, sub, SubAssign, sub_assign, checked_sub);
impl_binary_op!(Mul, mul, MulAssign, mul_assign, checked_mul);
impl_binary_op!(Div, div, DivAssign, div_assign, checked_div);
impl_binary_op!(Rem, rem, RemAssign, rem_assign, checked_rem);

impl Neg for BigInt {
    type Output = BigInt;

    fn neg(mut self) -> BigInt {
        self.negate();
        self
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        -self.clone()
    }
}

macro_rules! impl_shift_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $checked:ident) => {
        impl $trait<u32> for &BigInt {
            type Output = BigInt;

            #[track_caller]
            fn $method(self, bits: u32) -> BigInt {
                expect_arith(self.$checked(u64::from(bits)))
            }
        }

        impl $trait<u32> for BigInt {
            type Output = BigInt;

            #[track_caller]
            fn $method(self, bits: u32) -> BigInt {
                expect_arith(self.$checked(u64::from(bits)))
            }
        }

        impl $assign_trait<u32> for BigInt {
            #[track_caller]
            fn $assign_method(&mut self, bits: u32) {
                *self = expect_arith(self.$checked(u64::from(bits)));
            }
        }
    };
}

impl_shift_op!(Shl, shl, ShlAssign, shl_assign, checked_shl);
impl_shift_op!(Shr, shr, ShrAssign, shr_assign, checked_shr);

/// Operators and comparisons with a built-in integer on the left.
macro_rules! impl_primitive_lhs {
    ($($t:ty),*) => {$(
        impl Add<BigInt> for $t {
            type Output = BigInt;

            #[track_caller]
            fn add(self, rhs: BigInt) -> BigInt {
                expect_arith(rhs.checked_add(&self))
            }
        }

        impl Add<&BigInt> for $t {
            type Output = BigInt;

            #[track_caller]
            fn add(self, rhs: &BigInt) -> BigInt {
                expect_arith(rhs.checked_add(&self))
            }
        }

        impl Sub<BigInt> for $t {
            type Output = BigInt;

            #[track_caller]
            fn sub(self, rhs: BigInt) -> BigInt {
                expect_arith(BigInt::from(self).checked_sub(&rhs))
            }
        }

        impl Sub<&BigInt> for $t {
            type Output = BigInt;

            #[track_caller]
            fn sub(self, rhs: &BigInt) -> BigInt {
                expect_arith(BigInt::from(self).checked_sub(rhs))
            }
        }

        impl Mul<BigInt> for $t {
            type Output = BigInt;

            #[track_caller]
            fn mul(self, rhs: BigInt) -> BigInt {
                expect_arith(rhs.checked_mul(&self))
            }
        }

        impl Mul<&BigInt> for $t {
            type Output = BigInt;

            #[track_caller]
            fn mul(self, rhs: &BigInt) -> BigInt {
                expect_arith(rhs.checked_mul(&self))
            }
        }

        impl Div<&BigInt> for $t {
            type Output = BigInt;

            #[track_caller]
            fn div(self, rhs: &BigInt) -> BigInt {
                expect_arith(BigInt::from(self).checked_div(rhs))
            }
        }

        impl Rem<&BigInt> for $t {
            type Output = BigInt;

            #[track_caller]
            fn rem(self, rhs: &BigInt) -> BigInt {
                expect_arith(BigInt::from(self).checked_rem(rhs))
            }
        }

        impl PartialEq<$t> for BigInt {
            fn eq(&self, other: &$t) -> bool {
                self.cmp_operand(other) == Ordering::Equal
            }
        }

        impl PartialEq<BigInt> for $t {
            fn eq(&self, other: &BigInt) -> bool {
                other.cmp_operand(self) == Ordering::Equal
            }
        }

        impl PartialOrd<$t> for BigInt {
            fn partial_cmp(&self, other: &$t) -> Option<Ordering> {
                Some(self.cmp_operand(other))
            }
        }

        impl PartialOrd<BigInt> for $t {
            fn partial_cmp(&self, other: &BigInt) -> Option<Ordering> {
                Some(other.cmp_operand(self).reverse())
            }
        }
    )*};
}

impl_primitive_lhs!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
