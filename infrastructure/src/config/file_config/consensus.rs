//! Consensus configuration from TOML (`[consensus]` section)

use conclave_application::ConsensusSettings;
use conclave_domain::ModelCategory;
use serde::{Deserialize, Serialize};

/// Raw consensus configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConsensusConfig {
    /// Per-consultation timeout in seconds
    pub timeout_seconds: u64,
    /// Requested temperature (clamped per model)
    pub temperature: f32,
    /// Keep `consensus_complete` true even when every pair failed
    pub complete_on_total_failure: bool,
    /// Model recorded as running the surrounding workflow step
    pub default_model: Option<String>,
    /// Category used for fallback model selection
    pub category: ModelCategory,
}

impl Default for FileConsensusConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 120,
            temperature: 0.2,
            complete_on_total_failure: true,
            default_model: None,
            category: ModelCategory::ExtendedReasoning,
        }
    }
}

impl FileConsensusConfig {
    /// Convert to the application-layer settings
    pub fn to_settings(&self) -> ConsensusSettings {
        ConsensusSettings::default()
            .with_timeout_seconds(self.timeout_seconds.max(1))
            .with_temperature(self.temperature)
            .with_complete_on_total_failure(self.complete_on_total_failure)
            .with_category(self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_to_settings() {
        let config = FileConsensusConfig {
            timeout_seconds: 45,
            temperature: 0.5,
            complete_on_total_failure: false,
            default_model: None,
            category: ModelCategory::FastResponse,
        };
        let settings = config.to_settings();
        assert_eq!(settings.per_call_timeout, Duration::from_secs(45));
        assert_eq!(settings.temperature, 0.5);
        assert!(!settings.complete_on_total_failure);
        assert_eq!(settings.category, ModelCategory::FastResponse);
    }

    #[test]
    fn test_zero_timeout_is_raised() {
        let config = FileConsensusConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        assert_eq!(config.to_settings().per_call_timeout, Duration::from_secs(1));
    }
}
