//! Restriction policy driven by `<FAMILY>_ALLOWED_MODELS` lists

use conclave_application::{ConfigLookup, RestrictionPolicy};
use conclave_domain::ProviderFamily;
use std::collections::{HashMap, HashSet};
use tracing::info;

/// Per-family allow lists read once at startup.
///
/// Names are compared case-insensitively. A family without a list (or with
/// an empty one) is unrestricted.
#[derive(Debug, Clone, Default)]
pub struct EnvRestrictionPolicy {
    allowed: HashMap<ProviderFamily, HashSet<String>>,
}

impl EnvRestrictionPolicy {
    pub fn from_config(config: &dyn ConfigLookup) -> Self {
        let mut allowed = HashMap::new();
        for family in ProviderFamily::PRIORITY_ORDER {
            let key = family.restriction_key();
            let Some(raw) = config.get_config(&key) else {
                continue;
            };
            let models: HashSet<String> = raw
                .split(',')
                .map(|m| m.trim().to_ascii_lowercase())
                .filter(|m| !m.is_empty())
                .collect();
            if models.is_empty() {
                continue;
            }
            info!(family = %family, count = models.len(), "Model restrictions active");
            allowed.insert(family, models);
        }
        Self { allowed }
    }

    /// Explicit allow list for one family (mainly for tests)
    pub fn with_allowed<I, S>(mut self, family: ProviderFamily, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed.insert(
            family,
            models
                .into_iter()
                .map(|m| m.as_ref().trim().to_ascii_lowercase())
                .collect(),
        );
        self
    }

    pub fn is_restricted(&self, family: ProviderFamily) -> bool {
        self.allowed.contains_key(&family)
    }

    /// Sorted allow list for a family, if restricted
    pub fn allowed_models(&self, family: ProviderFamily) -> Option<Vec<String>> {
        self.allowed.get(&family).map(|set| {
            let mut models: Vec<String> = set.iter().cloned().collect();
            models.sort();
            models
        })
    }
}

impl RestrictionPolicy for EnvRestrictionPolicy {
    fn is_allowed(&self, family: ProviderFamily, model_name: &str) -> bool {
        match self.allowed.get(&family) {
            Some(models) => models.contains(&model_name.trim().to_ascii_lowercase()),
            None => true,
        }
    }
}
