//! # Desk Configuration
//!
//! Unified configuration for the front desk and the queue it drives.
//!
//! ## Load Order
//!
//! 1. Built-in defaults
//! 2. JSON file named by `TRIAGE_CONFIG` (optional, partial files allowed)
//! 3. `TRIAGE_LOG_LEVEL` and `TRIAGE_REFRESH_MS` environment overrides

use crate::errors::DeskError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing_subscriber::EnvFilter;
use triage_queue::{is_valid_timestamp_format, TriageConfig, DEFAULT_TIMESTAMP_FORMAT};

/// Environment variable naming the JSON config file.
pub const CONFIG_PATH_ENV: &str = "TRIAGE_CONFIG";
/// Environment override for `log_level`.
pub const LOG_LEVEL_ENV: &str = "TRIAGE_LOG_LEVEL";
/// Environment override for `refresh_interval_ms`.
pub const REFRESH_MS_ENV: &str = "TRIAGE_REFRESH_MS";

/// Complete desk configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    /// Log filter directive used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Period of the background refresh tick. 0 disables it.
    pub refresh_interval_ms: u64,
    /// strftime format for arrival times in the waiting list.
    pub timestamp_format: String,
    /// Queue configuration.
    pub queue: TriageConfig,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            refresh_interval_ms: 5_000,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            queue: TriageConfig::default(),
        }
    }
}

impl DeskConfig {
    /// Reads a (possibly partial) JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, DeskError> {
        let raw = std::fs::read_to_string(path).map_err(|source| DeskError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(DeskError::ConfigParse)
    }

    /// Checks every field.
    pub fn validate(&self) -> Result<(), DeskError> {
        self.queue
            .validate()
            .map_err(|e| DeskError::InvalidConfig(e.to_string()))?;

        if !is_valid_timestamp_format(&self.timestamp_format) {
            return Err(DeskError::InvalidConfig(format!(
                "timestamp_format '{}' is not a valid strftime format",
                self.timestamp_format
            )));
        }

        EnvFilter::try_new(&self.log_level).map_err(|e| {
            DeskError::InvalidConfig(format!("log_level '{}': {}", self.log_level, e))
        })?;

        Ok(())
    }
}

/// Load configuration from the process environment.
pub fn load_config() -> Result<DeskConfig, DeskError> {
    load_config_from(|key| std::env::var(key).ok())
}

/// Load configuration using `env` to look up variables.
pub fn load_config_from(env: impl Fn(&str) -> Option<String>) -> Result<DeskConfig, DeskError> {
    let mut config = match env(CONFIG_PATH_ENV) {
        Some(path) => DeskConfig::from_file(Path::new(&path))?,
        None => DeskConfig::default(),
    };

    if let Some(level) = env(LOG_LEVEL_ENV) {
        config.log_level = level;
    }

    if let Some(raw) = env(REFRESH_MS_ENV) {
        config.refresh_interval_ms = raw.trim().parse().map_err(|_| {
            DeskError::InvalidConfig(format!("{} must be an integer, got '{}'", REFRESH_MS_ENV, raw))
        })?;
    }

    config.validate()?;
    Ok(config)
}
