//! Lock-free concurrent cell holding a numcell [`BigInt`](numcell_int::BigInt).
//!
//! [`AtomicBigInt`] lets many threads read and update one big-integer
//! location without locks:
//!
//! ```text
//! AtomicBigInt
//! ├── current: AtomicPtr<BigInt>        the published version
//! ├── HazardDomain
//! │   ├── hazard slots (128-byte aligned, append-only list)
//! │   └── retired queue (crossbeam MPMC)
//! ├── CellCounters → CellStats
//! └── CellConfig
//! ```
//!
//! Readers protect the published version through a hazard slot and clone
//! it, which only bumps the digit buffer's reference count. Writers compute
//! a candidate from a snapshot and install it with one compare-and-swap,
//! retrying on a lost race. Replaced versions are freed once no slot
//! protects them.
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use numcell_atomic::AtomicBigInt;
//! use numcell_int::BigInt;
//!
//! let cell = Arc::new(AtomicBigInt::default());
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let cell = Arc::clone(&cell);
//!         thread::spawn(move || {
//!             for _ in 0..100 {
//!                 cell.increment().unwrap();
//!             }
//!         })
//!     })
//!     .collect();
//! for h in handles {
//!     h.join().unwrap();
//! }
//! assert_eq!(cell.load(), BigInt::from(400));
//! ```
//!
//! This is the only numcell crate containing `unsafe`; it is confined to
//! the `hazard` and `cell` modules.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod cell;
pub mod config;
pub mod error;
mod hazard;
pub mod metrics;

pub use cell::AtomicBigInt;
pub use config::CellConfig;
pub use error::{CellError, ConfigError};
pub use metrics::CellStats;
