//! proptest strategies.

use numcell_digits::Digit;
use numcell_int::BigInt;
use proptest::collection::vec;
use proptest::prelude::*;

/// Values of up to `max_digits` digits.
pub fn arb_bigint_with(max_digits: usize) -> impl Strategy<Value = BigInt> {
    let digit = prop_oneof![
        4 => any::<Digit>(),
        1 => Just(Digit::MAX),
        1 => Just(0 as Digit),
        1 => 0..16 as Digit,
    ];
    (any::<bool>(), vec(digit, 0..=max_digits))
        .prop_map(|(negative, digits)| BigInt::from_digits(negative, &digits).expect("test allocation"))
}

/// Values of up to four digits.
pub fn arb_bigint() -> impl Strategy<Value = BigInt> {
    arb_bigint_with(4)
}

/// Nonzero values of up to four digits.
pub fn arb_nonzero_bigint() -> impl Strategy<Value = BigInt> {
    arb_bigint().prop_filter("nonzero", |v| !v.is_zero())
}

/// Values that fit in an `i64`, for checking against the reference model.
pub fn arb_small_bigint() -> impl Strategy<Value = BigInt> {
    any::<i64>().prop_map(BigInt::from)
}
