//! Algebraic properties of the engine, checked with generated operands.

use numcell_int::BigInt;
use numcell_test_utils::{arb_bigint, arb_nonzero_bigint, arb_small_bigint, ReferenceModel};
use proptest::prelude::*;

proptest! {
    #[test]
    fn addition_is_commutative(a in arb_bigint(), b in arb_bigint()) {
        prop_assert_eq!(&a + &b, &b + &a);
    }

    #[test]
    fn addition_is_associative(a in arb_bigint(), b in arb_bigint(), c in arb_bigint()) {
        prop_assert_eq!((&a + &b) + &c, &a + (&b + &c));
    }

    #[test]
    fn additive_inverse(a in arb_bigint()) {
        prop_assert!((&a + -&a).is_zero());
    }

    #[test]
    fn multiplicative_identities(a in arb_bigint()) {
        prop_assert_eq!(&a * 1, a.clone());
        prop_assert!((&a * 0).is_zero());
        prop_assert_eq!(&a * -1, -&a);
    }

    #[test]
    fn division_identity(a in arb_bigint(), b in arb_nonzero_bigint()) {
        let (q, r) = a.div_rem(&b);
        prop_assert_eq!(&q * &b + &r, a.clone());
        prop_assert!(r.is_zero() || r.is_negative() == a.is_negative());
        prop_assert!(r.abs() < b.abs());
    }

    #[test]
    fn gcd_divides_both(a in arb_bigint(), b in arb_bigint()) {
        let g = a.gcd(&b).unwrap();
        prop_assert!(!g.is_negative());
        if g.is_zero() {
            prop_assert!(a.is_zero() && b.is_zero());
        } else {
            prop_assert!(a.checked_rem(&g).unwrap().is_zero());
            prop_assert!(b.checked_rem(&g).unwrap().is_zero());
        }
        prop_assert_eq!(BigInt::zero().gcd(&a).unwrap(), a.abs());
    }

    #[test]
    fn lcm_is_a_common_multiple(a in arb_bigint(), b in arb_bigint()) {
        let l = a.lcm(&b).unwrap();
        if a.is_zero() || b.is_zero() {
            prop_assert!(l.is_zero());
        } else {
            prop_assert!(l.checked_rem(&a).unwrap().is_zero());
            prop_assert!(l.checked_rem(&b).unwrap().is_zero());
        }
    }

    #[test]
    fn ordering_is_total(a in arb_bigint(), b in arb_bigint()) {
        let held = [a < b, a == b, a > b].iter().filter(|&&x| x).count();
        prop_assert_eq!(held, 1);
    }

    #[test]
    fn text_round_trips(a in arb_bigint(), radix in 2u32..=36) {
        let text = a.to_string_radix(radix, 0);
        prop_assert_eq!(BigInt::from_str_radix(&text, radix).unwrap(), a);
    }

    #[test]
    fn increment_then_decrement(a in arb_bigint()) {
        let mut b = a.clone();
        b.increment().unwrap();
        prop_assert_eq!(&b, &(&a + 1));
        b.decrement().unwrap();
        prop_assert_eq!(b, a);
    }

    #[test]
    fn shifts_match_power_of_two_arithmetic(a in arb_bigint(), bits in 0u32..200) {
        let scale = BigInt::one() << bits;
        prop_assert_eq!(&a << bits, &a * &scale);
        if !a.is_negative() {
            prop_assert_eq!(&a >> bits, &a / &scale);
        }
    }

    #[test]
    fn agrees_with_reference_model(a in arb_small_bigint(), b in arb_small_bigint()) {
        let (ra, rb) = (ReferenceModel::of(&a), ReferenceModel::of(&b));
        prop_assert_eq!(&a + &b, ra.add(rb).to_bigint());
        prop_assert_eq!(&a - &b, ra.sub(rb).to_bigint());
        prop_assert_eq!(&a * &b, ra.mul(rb).to_bigint());
        prop_assert_eq!(a.gcd(&b).unwrap(), ra.gcd(rb).to_bigint());
        prop_assert_eq!(a.lcm(&b).unwrap(), ra.lcm(rb).to_bigint());
        match rb.div_rem(ra) {
            Some((q, r)) => prop_assert_eq!(b.div_rem(&a), (q.to_bigint(), r.to_bigint())),
            None => prop_assert!(b.checked_div_rem(&a).is_err()),
        }
        prop_assert_eq!(a.to_string_radix(16, 0), ra.to_string_radix(16));
        prop_assert_eq!(a.cmp(&b), ra.0.cmp(&rb.0));
    }
}
