//! Provider Registry
//!
//! The [`ProviderRegistry`] owns, per [`ProviderFamily`], an ordered list of
//! [`ProviderFactory`] registrations and a lazily populated instance cache.
//!
//! # Resolution
//!
//! `resolve(model)` walks families in [`ProviderFamily::PRIORITY_ORDER`]
//! (native APIs, then gateway and custom endpoints, then local CLI tools,
//! then the aggregator) and, within a family, registrations in the order
//! they were added. The first provider whose `validate` accepts the name
//! wins. For a fixed registry state the answer is always the same.
//!
//! # Availability
//!
//! A slot whose family lacks a credential or endpoint is simply empty. No
//! configuration problem ever surfaces as an error from the registry.
//! The unavailable outcome is cached like an instance, so the diagnostic
//! is logged once until [`ProviderRegistry::clear_cache`].
//!
//! # Concurrency
//!
//! Registrations and cached instances live behind one lock, so
//! [`ProviderRegistry::reset`] clears both atomically. Construction runs
//! outside the lock; when two callers race to fill the same slot both build
//! a provider and the last write is kept.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use conclave_domain::{ModelCategory, ProviderFamily};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::ports::config_lookup::ConfigLookup;
use crate::ports::model_provider::{Construction, ModelProvider, ProviderContext, ProviderFactory};
use crate::ports::restriction::{AllowAll, RestrictionPolicy};

/// Returned by [`ProviderRegistry::get_preferred_fallback_model`] when no
/// model is available anywhere.
pub const DEFAULT_FALLBACK_MODEL: &str = "gemini-2.5-flash";

const OPENROUTER_KEY: &str = "OPENROUTER_API_KEY";
const KILO_KEY: &str = "KILO_API_KEY";
const KILO_PREFERRED: &str = "KILO_PREFERRED";

/// Cached outcome of constructing one slot
enum Cached {
    Empty,
    Ready(Arc<dyn ModelProvider>),
    /// Construction was skipped or failed; retried only after
    /// `clear_cache` or with `force_new`
    Unavailable,
}

struct Slot {
    factory: Arc<dyn ProviderFactory>,
    cached: Cached,
}

impl Slot {
    fn new(factory: Arc<dyn ProviderFactory>) -> Self {
        Self {
            factory,
            cached: Cached::Empty,
        }
    }
}

/// Registry of backend providers, grouped by family
pub struct ProviderRegistry {
    slots: RwLock<HashMap<ProviderFamily, Vec<Slot>>>,
    config: Arc<dyn ConfigLookup>,
    restrictions: Arc<dyn RestrictionPolicy>,
}

impl ProviderRegistry {
    pub fn new(config: Arc<dyn ConfigLookup>, restrictions: Arc<dyn RestrictionPolicy>) -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            config,
            restrictions,
        }
    }

    /// Registry without any model restrictions
    pub fn unrestricted(config: Arc<dyn ConfigLookup>) -> Self {
        Self::new(config, Arc::new(AllowAll))
    }

    pub fn restrictions(&self) -> &Arc<dyn RestrictionPolicy> {
        &self.restrictions
    }

    // ==================== Registration ====================

    /// Register a provider factory for `family`.
    ///
    /// Without `append` the family's whole list (and its cached instances)
    /// is replaced. With `append` the factory is added at the end and
    /// existing entries keep their caches.
    pub fn register(&self, family: ProviderFamily, factory: Arc<dyn ProviderFactory>, append: bool) {
        let mut table = self.slots.write();
        let list = table.entry(family).or_default();
        if !append {
            list.clear();
        }
        debug!(
            family = %family,
            provider = factory.name(),
            position = list.len(),
            append,
            "Registered provider"
        );
        list.push(Slot::new(factory));
    }

    /// Remove every registration for `family`. Returns whether any existed.
    pub fn unregister(&self, family: ProviderFamily) -> bool {
        let removed = self.slots.write().remove(&family);
        removed.is_some_and(|list| !list.is_empty())
    }

    pub fn registered_count(&self, family: ProviderFamily) -> usize {
        self.slots.read().get(&family).map_or(0, Vec::len)
    }

    /// Families with at least one registration, in priority order
    pub fn get_available_families(&self) -> Vec<ProviderFamily> {
        ProviderFamily::PRIORITY_ORDER
            .into_iter()
            .filter(|family| self.registered_count(*family) > 0)
            .collect()
    }

    /// Families where at least one registration constructs successfully
    pub fn get_families_with_credentials(&self) -> Vec<ProviderFamily> {
        ProviderFamily::PRIORITY_ORDER
            .into_iter()
            .filter(|family| {
                (0..self.registered_count(*family))
                    .any(|index| self.get_provider(*family, index, false).is_some())
            })
            .collect()
    }

    /// Drop cached instances but keep registrations
    pub fn clear_cache(&self) {
        let mut table = self.slots.write();
        for slot in table.values_mut().flat_map(|list| list.iter_mut()) {
            slot.cached = Cached::Empty;
        }
    }

    /// Wipe every registration and cached instance
    pub fn reset(&self) {
        self.slots.write().clear();
    }

    // ==================== Instances ====================

    /// Provider at `index` within `family`, constructing it on first use.
    ///
    /// `force_new` bypasses the cache and replaces the cached instance.
    /// Returns `None` when the slot does not exist or its configuration is
    /// unavailable. An unavailable slot is remembered too, so its
    /// diagnostic is emitted once until the cache is cleared.
    pub fn get_provider(
        &self,
        family: ProviderFamily,
        index: usize,
        force_new: bool,
    ) -> Option<Arc<dyn ModelProvider>> {
        let factory = {
            let table = self.slots.read();
            let slot = table.get(&family)?.get(index)?;
            if !force_new {
                match &slot.cached {
                    Cached::Ready(instance) => return Some(Arc::clone(instance)),
                    Cached::Unavailable => return None,
                    Cached::Empty => {}
                }
            }
            Arc::clone(&slot.factory)
        };

        let provider = self.construct(family, factory.as_ref());

        let mut table = self.slots.write();
        if let Some(slot) = table.get_mut(&family).and_then(|list| list.get_mut(index))
            && Arc::ptr_eq(&slot.factory, &factory)
        {
            slot.cached = match &provider {
                Some(instance) => Cached::Ready(Arc::clone(instance)),
                None => Cached::Unavailable,
            };
        }
        provider
    }

    fn construct(
        &self,
        family: ProviderFamily,
        factory: &dyn ProviderFactory,
    ) -> Option<Arc<dyn ModelProvider>> {
        let (credential, credential_key) = self.resolve_credential(family);
        let endpoint = family
            .endpoint_key()
            .and_then(|key| self.config.get_config(key));

        if let Some(endpoint_key) = family.endpoint_key()
            && endpoint.is_none()
        {
            if credential.is_some() {
                warn!(
                    family = %family,
                    provider = factory.name(),
                    "Credential set but {} missing, skipping provider",
                    endpoint_key
                );
            } else {
                debug!(
                    family = %family,
                    provider = factory.name(),
                    "{} not configured, skipping provider",
                    endpoint_key
                );
            }
            return None;
        }

        if factory.requires_credential() && credential.is_none() {
            debug!(
                family = %family,
                provider = factory.name(),
                "No credential configured, skipping provider"
            );
            return None;
        }

        let context = ProviderContext {
            family,
            credential,
            credential_key,
            endpoint,
            config: self.config.as_ref(),
            restrictions: Arc::clone(&self.restrictions),
        };

        match factory.construct(&context) {
            Construction::Constructed(provider) => {
                debug!(family = %family, provider = factory.name(), "Constructed provider");
                Some(provider)
            }
            Construction::Unavailable { reason } => {
                debug!(
                    family = %family,
                    provider = factory.name(),
                    reason = %reason,
                    "Provider unavailable"
                );
                None
            }
        }
    }

    /// Credential and the key it came from.
    ///
    /// The aggregator family accepts either of two keys: the Kilo key wins
    /// when `KILO_PREFERRED` is truthy, otherwise the OpenRouter key, with
    /// the Kilo key as a last resort.
    fn resolve_credential(&self, family: ProviderFamily) -> (Option<String>, Option<&'static str>) {
        if family == ProviderFamily::OpenRouter {
            let openrouter = self.config.get_config(OPENROUTER_KEY);
            let kilo = self.config.get_config(KILO_KEY);
            let kilo_preferred = self
                .config
                .get_config(KILO_PREFERRED)
                .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "true" | "1" | "yes"));

            return match (openrouter, kilo) {
                (_, Some(kilo)) if kilo_preferred => (Some(kilo), Some(KILO_KEY)),
                (Some(openrouter), _) => (Some(openrouter), Some(OPENROUTER_KEY)),
                (None, Some(kilo)) => (Some(kilo), Some(KILO_KEY)),
                (None, None) => (None, None),
            };
        }

        match family.credential_key() {
            Some(key) => (self.config.get_config(key), Some(key)),
            None => (None, None),
        }
    }

    /// Every constructible provider, in resolution order
    fn providers_in_priority_order(&self) -> Vec<Arc<dyn ModelProvider>> {
        ProviderFamily::PRIORITY_ORDER
            .into_iter()
            .flat_map(|family| {
                (0..self.registered_count(family))
                    .filter_map(move |index| self.get_provider(family, index, false))
            })
            .collect()
    }

    // ==================== Resolution ====================

    /// Provider that serves `model_name`, or `None` if nobody does
    pub fn resolve(&self, model_name: &str) -> Option<Arc<dyn ModelProvider>> {
        for family in ProviderFamily::PRIORITY_ORDER {
            for index in 0..self.registered_count(family) {
                let Some(provider) = self.get_provider(family, index, false) else {
                    continue;
                };
                if provider.validate(model_name) {
                    debug!(model = %model_name, family = %family, index, "Resolved model");
                    return Some(provider);
                }
            }
        }
        debug!(model = %model_name, "No provider serves model");
        None
    }

    /// Restriction-filtered model list of one provider.
    ///
    /// Filtering happens exactly once: by the provider when it says it
    /// filters, otherwise here.
    fn allowed_models(&self, provider: &dyn ModelProvider, respect_restrictions: bool) -> Vec<String> {
        let models = provider.list_models(respect_restrictions);
        if !respect_restrictions || provider.applies_restrictions() {
            return models;
        }
        let family = provider.family();
        models
            .into_iter()
            .filter(|model| self.restrictions.is_allowed(family, model))
            .collect()
    }

    /// Every advertised model mapped to the family that would serve it.
    ///
    /// When two families advertise the same name the higher-priority one is
    /// kept, matching what [`Self::resolve`] would pick.
    pub fn get_available_models(&self, respect_restrictions: bool) -> BTreeMap<String, ProviderFamily> {
        let mut models = BTreeMap::new();
        for provider in self.providers_in_priority_order() {
            let family = provider.family();
            for model in self.allowed_models(provider.as_ref(), respect_restrictions) {
                models.entry(model).or_insert(family);
            }
        }
        models
    }

    /// Sorted, restriction-filtered model names, optionally for one family
    pub fn get_available_model_names(&self, family: Option<ProviderFamily>) -> Vec<String> {
        self.get_available_models(true)
            .into_iter()
            .filter(|(_, f)| family.is_none_or(|wanted| wanted == *f))
            .map(|(model, _)| model)
            .collect()
    }

    /// Model to fall back on for `category`. Never fails.
    ///
    /// The first provider (in priority order) that nominates a model from
    /// its allowed set wins. Without any nomination the lexicographically
    /// smallest allowed name is used, and with no models at all
    /// [`DEFAULT_FALLBACK_MODEL`].
    pub fn get_preferred_fallback_model(&self, category: ModelCategory) -> String {
        let mut seen: Vec<String> = Vec::new();

        for provider in self.providers_in_priority_order() {
            let allowed = self.allowed_models(provider.as_ref(), true);
            if allowed.is_empty() {
                continue;
            }
            if let Some(model) = provider.preferred_model(category, &allowed) {
                info!(
                    family = %provider.family(),
                    category = %category,
                    model = %model,
                    "Selected fallback model"
                );
                return model;
            }
            seen.extend(allowed);
        }

        seen.into_iter().min().unwrap_or_else(|| {
            debug!(category = %category, "No models available, using default fallback");
            DEFAULT_FALLBACK_MODEL.to_string()
        })
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let table = self.slots.read();
        let mut map = f.debug_map();
        for family in ProviderFamily::PRIORITY_ORDER {
            if let Some(list) = table.get(&family) {
                let names: Vec<&str> = list.iter().map(|slot| slot.factory.name()).collect();
                map.entry(&family, &names);
            }
        }
        map.finish()
    }
}
