//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod consensus;
mod output;

pub use consensus::FileConsensusConfig;
pub use output::{FileOutputConfig, FileOutputFormat};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("consensus.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("consensus.temperature {0} is outside 0.0..=2.0")]
    TemperatureOutOfRange(f32),

    #[error("consensus.default_model cannot be empty")]
    EmptyModelName,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Consensus fan-out settings
    pub consensus: FileConsensusConfig,
    /// Credentials and endpoints, consulted before the process environment
    pub credentials: BTreeMap<String, String>,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.consensus.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        let temperature = self.consensus.temperature;
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigValidationError::TemperatureOutOfRange(temperature));
        }

        if let Some(model) = &self.consensus.default_model
            && model.trim().is_empty()
        {
            return Err(ConfigValidationError::EmptyModelName);
        }

        Ok(())
    }
}
