//! Credential and endpoint lookup

use conclave_application::ConfigLookup;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Reads the process environment; empty values count as absent
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfig;

impl ConfigLookup for EnvConfig {
    fn get_config(&self, key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// File `[credentials]` table first, then another lookup
pub struct LayeredConfig {
    values: BTreeMap<String, String>,
    fallback: Arc<dyn ConfigLookup>,
}

impl LayeredConfig {
    pub fn new(values: BTreeMap<String, String>, fallback: Arc<dyn ConfigLookup>) -> Self {
        Self { values, fallback }
    }

    /// File credentials over the process environment
    pub fn over_env(values: BTreeMap<String, String>) -> Self {
        Self::new(values, Arc::new(EnvConfig))
    }
}

impl ConfigLookup for LayeredConfig {
    fn get_config(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .or_else(|| self.fallback.get_config(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conclave_application::StaticConfig;
    use figment::Jail;

    #[test]
    fn test_env_config_treats_empty_as_absent() {
        Jail::expect_with(|jail| {
            jail.set_env("CONCLAVE_TEST_PRESENT", "value");
            jail.set_env("CONCLAVE_TEST_EMPTY", "");
            assert_eq!(EnvConfig.get_config("CONCLAVE_TEST_PRESENT").as_deref(), Some("value"));
            assert_eq!(EnvConfig.get_config("CONCLAVE_TEST_EMPTY"), None);
            assert_eq!(EnvConfig.get_config("CONCLAVE_TEST_MISSING"), None);
            Ok(())
        });
    }

    #[test]
    fn test_layered_prefers_file_values() {
        let fallback = StaticConfig::new()
            .with("OPENAI_API_KEY", "from-env")
            .with("XAI_API_KEY", "xai-env");
        let mut values = BTreeMap::new();
        values.insert("OPENAI_API_KEY".to_string(), "from-file".to_string());
        values.insert("XAI_API_KEY".to_string(), "".to_string());

        let layered = LayeredConfig::new(values, Arc::new(fallback));
        assert_eq!(layered.get_config("OPENAI_API_KEY").as_deref(), Some("from-file"));
        // Empty file value falls through
        assert_eq!(layered.get_config("XAI_API_KEY").as_deref(), Some("xai-env"));
        assert_eq!(layered.get_config("GEMINI_API_KEY"), None);
    }
}
