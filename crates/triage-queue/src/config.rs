//! Configuration for the triage queue.

use crate::domain::entities::MIN_PATIENT_ID_LEN;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest accepted `expected_capacity`. The index is pre-sized to this many
/// slots at most.
pub const MAX_EXPECTED_CAPACITY: usize = 1_000_000;

/// Queue configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Minimum patient id length checked at admission. Never below 8.
    pub min_patient_id_len: usize,
    /// Expected number of waiting patients, used to pre-size the index.
    /// At most [`MAX_EXPECTED_CAPACITY`].
    pub expected_capacity: usize,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            min_patient_id_len: MIN_PATIENT_ID_LEN,
            expected_capacity: 128,
        }
    }
}

impl TriageConfig {
    /// Creates a minimal config for testing.
    pub fn for_testing() -> Self {
        Self {
            expected_capacity: 8,
            ..Default::default()
        }
    }

    /// Checks the configuration against hard limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_patient_id_len < MIN_PATIENT_ID_LEN {
            return Err(ConfigError::PatientIdFloor {
                configured: self.min_patient_id_len,
                floor: MIN_PATIENT_ID_LEN,
            });
        }
        if self.expected_capacity > MAX_EXPECTED_CAPACITY {
            return Err(ConfigError::CapacityCeiling {
                configured: self.expected_capacity,
                ceiling: MAX_EXPECTED_CAPACITY,
            });
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("min_patient_id_len {configured} is below the floor of {floor}")]
    PatientIdFloor { configured: usize, floor: usize },

    #[error("expected_capacity {configured} is above the ceiling of {ceiling}")]
    CapacityCeiling { configured: usize, ceiling: usize },
}
