//! Test utilities for numcell development.
//!
//! - [`generators`]: seeded [`ChaCha8Rng`](rand_chacha::ChaCha8Rng) operand
//!   pools for deterministic tests and benchmarks.
//! - [`strategies`]: proptest strategies over [`BigInt`](numcell_int::BigInt).
//! - [`oracle`]: an `i128` reference model for values that fit.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod generators;
pub mod oracle;
pub mod strategies;

pub use generators::{operand_pool, random_bigint};
pub use oracle::ReferenceModel;
pub use strategies::{arb_bigint, arb_nonzero_bigint, arb_small_bigint};
