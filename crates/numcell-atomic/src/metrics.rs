//! Per-cell counters.
//!
//! [`CellStats`] is a point-in-time copy of the cell's `Relaxed` counters;
//! fields read in one call are not a consistent cut across threads.

use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of a cell's activity since construction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellStats {
    /// Completed `load` calls.
    pub loads: u64,
    /// Compare-and-swap attempts by writers.
    pub cas_attempts: u64,
    /// Attempts that lost the race and retried.
    pub cas_failures: u64,
    /// Versions replaced and queued for reclamation.
    pub retired: u64,
    /// Retired versions freed so far.
    pub reclaimed: u64,
    /// Hazard slots registered with the cell.
    pub hazard_slots: usize,
}

#[derive(Default)]
pub(crate) struct CellCounters {
    pub(crate) loads: AtomicU64,
    pub(crate) cas_attempts: AtomicU64,
    pub(crate) cas_failures: AtomicU64,
    pub(crate) retired: AtomicU64,
    pub(crate) reclaimed: AtomicU64,
}

impl CellCounters {
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, hazard_slots: usize) -> CellStats {
        CellStats {
            loads: self.loads.load(Ordering::Relaxed),
            cas_attempts: self.cas_attempts.load(Ordering::Relaxed),
            cas_failures: self.cas_failures.load(Ordering::Relaxed),
            retired: self.retired.load(Ordering::Relaxed),
            reclaimed: self.reclaimed.load(Ordering::Relaxed),
            hazard_slots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_counters() {
        let c = CellCounters::default();
        CellCounters::bump(&c.loads);
        CellCounters::bump(&c.loads);
        CellCounters::bump(&c.cas_failures);
        c.reclaimed.fetch_add(5, Ordering::Relaxed);
        let s = c.snapshot(3);
        assert_eq!(s.loads, 2);
        assert_eq!(s.cas_failures, 1);
        assert_eq!(s.reclaimed, 5);
        assert_eq!(s.hazard_slots, 3);
        assert_eq!(s.cas_attempts, 0);
    }
}
