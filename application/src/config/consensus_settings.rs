//! Consensus settings - use case behaviour control.
//!
//! [`ConsensusSettings`] groups the static parameters that control how
//! [`RunConsensusUseCase`](crate::use_cases::run_consensus::RunConsensusUseCase)
//! dispatches and reports a fan-out. These are application-layer concerns,
//! not domain policy.

use conclave_domain::ModelCategory;
use std::time::Duration;

/// Fan-out control parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsensusSettings {
    /// Timeout applied to each (model, stance) invocation independently.
    pub per_call_timeout: Duration,
    /// Requested sampling temperature, clamped per model.
    pub temperature: f32,
    /// Whether `consensus_complete` stays true when every pair errored.
    pub complete_on_total_failure: bool,
    /// Category used when picking the model recorded in metadata.
    pub category: ModelCategory,
}

impl Default for ConsensusSettings {
    fn default() -> Self {
        Self {
            per_call_timeout: Duration::from_secs(120),
            temperature: 0.2,
            complete_on_total_failure: true,
            category: ModelCategory::ExtendedReasoning,
        }
    }
}

impl ConsensusSettings {
    // ==================== Builder Methods ====================

    pub fn with_per_call_timeout(mut self, timeout: Duration) -> Self {
        self.per_call_timeout = timeout;
        self
    }

    pub fn with_timeout_seconds(self, seconds: u64) -> Self {
        self.with_per_call_timeout(Duration::from_secs(seconds))
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_complete_on_total_failure(mut self, complete: bool) -> Self {
        self.complete_on_total_failure = complete;
        self
    }

    pub fn with_category(mut self, category: ModelCategory) -> Self {
        self.category = category;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ConsensusSettings::default();
        assert_eq!(settings.per_call_timeout, Duration::from_secs(120));
        assert_eq!(settings.temperature, 0.2);
        assert!(settings.complete_on_total_failure);
        assert_eq!(settings.category, ModelCategory::ExtendedReasoning);
    }

    #[test]
    fn test_builder() {
        let settings = ConsensusSettings::default()
            .with_timeout_seconds(5)
            .with_temperature(0.7)
            .with_complete_on_total_failure(false)
            .with_category(ModelCategory::FastResponse);
        assert_eq!(settings.per_call_timeout, Duration::from_secs(5));
        assert_eq!(settings.temperature, 0.7);
        assert!(!settings.complete_on_total_failure);
        assert_eq!(settings.category, ModelCategory::FastResponse);
    }
}
