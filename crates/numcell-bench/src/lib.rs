//! Benchmark operand profiles for numcell.
//!
//! - [`OPERAND_SIZES`]: digit counts every engine benchmark sweeps.
//! - [`full_width`]: a seeded value with exactly `digits` digits.
//! - [`operand_pair`]: a dividend/divisor pair with a nonzero top digit.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use numcell_digits::Digit;
use numcell_int::BigInt;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Operand sizes in digits.
pub const OPERAND_SIZES: [usize; 4] = [1, 4, 16, 64];

/// A positive value with exactly `digits` digits (top digit nonzero).
pub fn full_width(rng: &mut ChaCha8Rng, digits: usize) -> BigInt {
    let mut raw: Vec<Digit> = (0..digits).map(|_| rng.next_u64()).collect();
    if let Some(top) = raw.last_mut() {
        *top |= 1;
    }
    BigInt::from_digits(false, &raw).unwrap()
}

/// `(a, b)` with `a` of `digits` digits and `b` of half as many (at least 1).
pub fn operand_pair(seed: u64, digits: usize) -> (BigInt, BigInt) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let a = full_width(&mut rng, digits);
    let b = full_width(&mut rng, (digits / 2).max(1));
    (a, b)
}
