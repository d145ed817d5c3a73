//! Catalog-backed provider
//!
//! Native API families and the aggregator all serve a fixed table of
//! models. [`CatalogProvider`] pairs such a table with a [`ChatTransport`]
//! and handles alias resolution, restriction filtering and temperature
//! clamping the same way for every family.

use super::http::ChatTransport;
use async_trait::async_trait;
use conclave_application::{
    GenerateRequest, ModelProvider, ModelResponse, ProviderError, RestrictionPolicy,
};
use conclave_domain::{CapabilityDescriptor, ModelCategory, ProviderFamily};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Static model table of one family
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    family: ProviderFamily,
    descriptors: Vec<CapabilityDescriptor>,
    preferences: HashMap<ModelCategory, Vec<&'static str>>,
}

impl ModelCatalog {
    pub fn new(family: ProviderFamily, descriptors: Vec<CapabilityDescriptor>) -> Self {
        Self {
            family,
            descriptors,
            preferences: HashMap::new(),
        }
    }

    /// Models to nominate for `category`, most preferred first
    pub fn with_preferences(mut self, category: ModelCategory, models: &[&'static str]) -> Self {
        self.preferences.insert(category, models.to_vec());
        self
    }

    pub fn family(&self) -> ProviderFamily {
        self.family
    }

    /// Descriptor whose canonical name or alias matches `name`
    pub fn find(&self, name: &str) -> Option<&CapabilityDescriptor> {
        self.descriptors.iter().find(|d| d.matches(name))
    }

    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(CapabilityDescriptor::model_name)
    }

    pub fn preferences(&self, category: ModelCategory) -> &[&'static str] {
        self.preferences.get(&category).map_or(&[], Vec::as_slice)
    }
}

/// Provider serving a [`ModelCatalog`] over a [`ChatTransport`]
pub struct CatalogProvider {
    catalog: ModelCatalog,
    transport: Arc<dyn ChatTransport>,
    restrictions: Arc<dyn RestrictionPolicy>,
}

impl CatalogProvider {
    pub fn new(
        catalog: ModelCatalog,
        transport: Arc<dyn ChatTransport>,
        restrictions: Arc<dyn RestrictionPolicy>,
    ) -> Self {
        Self {
            catalog,
            transport,
            restrictions,
        }
    }

    /// A model is permitted when its canonical name or any alias is allowed
    fn is_permitted(&self, descriptor: &CapabilityDescriptor) -> bool {
        let family = self.catalog.family();
        std::iter::once(descriptor.model_name())
            .chain(descriptor.aliases().iter().map(String::as_str))
            .any(|name| self.restrictions.is_allowed(family, name))
    }

    fn permitted(&self, name: &str) -> Option<&CapabilityDescriptor> {
        self.catalog.find(name).filter(|d| self.is_permitted(d))
    }
}

#[async_trait]
impl ModelProvider for CatalogProvider {
    fn family(&self) -> ProviderFamily {
        self.catalog.family()
    }

    fn list_models(&self, respect_restrictions: bool) -> Vec<String> {
        self.catalog
            .descriptors
            .iter()
            .filter(|d| !respect_restrictions || self.is_permitted(d))
            .map(|d| d.model_name().to_string())
            .collect()
    }

    fn applies_restrictions(&self) -> bool {
        true
    }

    fn validate(&self, model_name: &str) -> bool {
        self.permitted(model_name).is_some()
    }

    fn capabilities(&self, model_name: &str) -> Result<CapabilityDescriptor, ProviderError> {
        self.catalog
            .find(model_name)
            .cloned()
            .ok_or_else(|| ProviderError::UnsupportedModel(model_name.to_string()))
    }

    fn preferred_model(&self, category: ModelCategory, allowed: &[String]) -> Option<String> {
        self.catalog
            .preferences(category)
            .iter()
            .find(|candidate| allowed.iter().any(|a| a == *candidate))
            .map(|model| model.to_string())
    }

    async fn invoke(&self, request: &GenerateRequest) -> Result<ModelResponse, ProviderError> {
        let descriptor = self
            .permitted(&request.model_name)
            .ok_or_else(|| ProviderError::UnsupportedModel(request.model_name.clone()))?;

        let mut call = request.clone();
        if let Some(constraint) = descriptor.temperature_constraint() {
            call.temperature = Some(match request.temperature {
                Some(requested) => constraint.clamp(requested),
                None => constraint.default_temperature(),
            });
        }
        if call.max_output_tokens.is_none() {
            call.max_output_tokens = Some(descriptor.max_output_tokens());
        }

        debug!(
            family = %self.catalog.family(),
            model = descriptor.model_name(),
            requested = %request.model_name,
            "Invoking catalog model"
        );
        let completion = self.transport.complete(descriptor.model_name(), &call).await?;

        Ok(ModelResponse::new(completion.content, descriptor).with_usage(completion.usage))
    }
}
