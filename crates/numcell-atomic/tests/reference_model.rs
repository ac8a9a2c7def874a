//! Sequences of cell operations agree with plain engine arithmetic.

use numcell_atomic::AtomicBigInt;
use numcell_int::BigInt;
use numcell_test_utils::{arb_bigint, operand_pool};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Add(BigInt),
    Sub(BigInt),
    Mul(BigInt),
    Max(BigInt),
    Min(BigInt),
    Increment,
    Decrement,
    Swap(BigInt),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_bigint().prop_map(Op::Add),
        arb_bigint().prop_map(Op::Sub),
        arb_bigint().prop_map(Op::Mul),
        arb_bigint().prop_map(Op::Max),
        arb_bigint().prop_map(Op::Min),
        Just(Op::Increment),
        Just(Op::Decrement),
        arb_bigint().prop_map(Op::Swap),
    ]
}

proptest! {
    #[test]
    fn cell_tracks_model(start in arb_bigint(), ops in proptest::collection::vec(arb_op(), 0..40)) {
        let cell = AtomicBigInt::new(start.clone());
        let mut model = start;
        for op in ops {
            let previous = model.clone();
            match op {
                Op::Add(v) => {
                    prop_assert_eq!(cell.fetch_add(&v).unwrap(), previous);
                    model = &model + &v;
                }
                Op::Sub(v) => {
                    prop_assert_eq!(cell.fetch_sub(&v).unwrap(), previous);
                    model = &model - &v;
                }
                Op::Mul(v) => {
                    prop_assert_eq!(cell.fetch_mul(&v).unwrap(), previous);
                    model = &model * &v;
                }
                Op::Max(v) => {
                    prop_assert_eq!(cell.fetch_max(&v), previous);
                    model = model.max(v);
                }
                Op::Min(v) => {
                    prop_assert_eq!(cell.fetch_min(&v), previous);
                    model = model.min(v);
                }
                Op::Increment => {
                    model = &model + 1;
                    prop_assert_eq!(cell.increment().unwrap(), model.clone());
                }
                Op::Decrement => {
                    model = &model - 1;
                    prop_assert_eq!(cell.decrement().unwrap(), model.clone());
                }
                Op::Swap(v) => {
                    prop_assert_eq!(cell.swap(v.clone()), previous);
                    model = v;
                }
            }
            prop_assert_eq!(cell.load(), model.clone());
        }
    }
}

#[test]
fn stores_from_a_fixed_pool() {
    let cell = AtomicBigInt::default();
    for value in operand_pool(42, 128, 6) {
        cell.store(value.clone());
        assert_eq!(cell.load(), value);
    }
    assert_eq!(cell.stats().retired, 128);
}
