//! Error types for the concurrent cell.

use std::error::Error;
use std::fmt;

use numcell_int::IntError;

/// Invalid [`CellConfig`](crate::CellConfig) values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `reclaim_threshold` is zero.
    ZeroReclaimThreshold,
    /// `initial_hazard_slots` is zero.
    ZeroHazardSlots,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroReclaimThreshold => write!(f, "reclaim_threshold must be at least 1"),
            Self::ZeroHazardSlots => write!(f, "initial_hazard_slots must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

/// Errors from cell construction and fallible updates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellError {
    /// The cell configuration was rejected.
    Config(ConfigError),
    /// The update's arithmetic failed; the cell is unchanged.
    Arithmetic(IntError),
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid cell config: {e}"),
            Self::Arithmetic(e) => write!(f, "cell update failed: {e}"),
        }
    }
}

impl Error for CellError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Arithmetic(e) => Some(e),
        }
    }
}

impl From<ConfigError> for CellError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<IntError> for CellError {
    fn from(e: IntError) -> Self {
        Self::Arithmetic(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_source_chain() {
        let err = CellError::from(IntError::DivisionByZero);
        assert_eq!(err.to_string(), "cell update failed: attempt to divide by zero");
        assert!(err.source().is_some());

        let err = CellError::from(ConfigError::ZeroHazardSlots);
        assert_eq!(
            err.to_string(),
            "invalid cell config: initial_hazard_slots must be at least 1"
        );
    }
}
