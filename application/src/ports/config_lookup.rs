//! Configuration lookup port

use std::collections::HashMap;

/// Key/value lookup for credentials and endpoints
///
/// Implementations must treat empty values as absent.
pub trait ConfigLookup: Send + Sync {
    fn get_config(&self, key: &str) -> Option<String>;
}

/// In-memory lookup, handy for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    values: HashMap<String, String>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl ConfigLookup for StaticConfig {
    fn get_config(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}
