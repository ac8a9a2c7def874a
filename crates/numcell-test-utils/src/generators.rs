//! Deterministic random big integers.

use numcell_digits::Digit;
use numcell_int::BigInt;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A random value with between 0 and `max_digits` digits and a random sign.
///
/// The top digit is biased toward small and all-ones patterns so carries
/// and normalisation shifts get exercised.
pub fn random_bigint(rng: &mut ChaCha8Rng, max_digits: usize) -> BigInt {
    let len = (rng.next_u64() as usize) % (max_digits + 1);
    let mut digits: Vec<Digit> = (0..len).map(|_| rng.next_u64()).collect();
    if let Some(top) = digits.last_mut() {
        match rng.next_u32() % 4 {
            0 => *top = Digit::MAX,
            1 => *top &= 0xFF,
            _ => {}
        }
    }
    let negative = rng.next_u32() & 1 == 1;
    BigInt::from_digits(negative, &digits).expect("test allocation")
}

/// `count` values from a fixed seed.
pub fn operand_pool(seed: u64, count: usize, max_digits: usize) -> Vec<BigInt> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|_| random_bigint(&mut rng, max_digits)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pools_are_reproducible() {
        assert_eq!(operand_pool(7, 32, 4), operand_pool(7, 32, 4));
        assert_ne!(operand_pool(7, 32, 4), operand_pool(8, 32, 4));
    }

    #[test]
    fn digit_count_is_bounded() {
        assert!(operand_pool(1, 64, 3).iter().all(|v| v.digits().len() <= 3));
    }
}
