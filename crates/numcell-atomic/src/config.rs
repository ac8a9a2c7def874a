//! Cell configuration.

use crate::error::ConfigError;

/// Tuning knobs for an [`AtomicBigInt`](crate::AtomicBigInt).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellConfig {
    /// Retired versions a cell accumulates before a writer scans for
    /// reclaimable ones. Must be at least 1.
    pub reclaim_threshold: usize,
    /// Hazard slots registered at construction. Must be at least 1; more
    /// are registered on demand when every slot is in use.
    pub initial_hazard_slots: usize,
    /// Lost races within one update after which a warning is logged.
    pub contention_warn_retries: u32,
}

impl CellConfig {
    /// Default for [`reclaim_threshold`](Self::reclaim_threshold).
    pub const DEFAULT_RECLAIM_THRESHOLD: usize = 16;
    /// Default for [`initial_hazard_slots`](Self::initial_hazard_slots).
    pub const DEFAULT_INITIAL_HAZARD_SLOTS: usize = 4;
    /// Default for [`contention_warn_retries`](Self::contention_warn_retries).
    pub const DEFAULT_CONTENTION_WARN_RETRIES: u32 = 1024;

    /// Check every field against its documented range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reclaim_threshold == 0 {
            return Err(ConfigError::ZeroReclaimThreshold);
        }
        if self.initial_hazard_slots == 0 {
            return Err(ConfigError::ZeroHazardSlots);
        }
        Ok(())
    }
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            reclaim_threshold: Self::DEFAULT_RECLAIM_THRESHOLD,
            initial_hazard_slots: Self::DEFAULT_INITIAL_HAZARD_SLOTS,
            contention_warn_retries: Self::DEFAULT_CONTENTION_WARN_RETRIES,
        }
    }
}
