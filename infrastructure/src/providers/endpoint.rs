//! OpenAI-compatible endpoints without a fixed catalog
//!
//! The unified gateway (Bifrost, LiteLLM) and self-hosted servers (Ollama,
//! vLLM, LM Studio) serve whatever their operator configured. Both are
//! described by a generic descriptor and advertise the names listed in
//! configuration.

use super::http::{ChatTransport, OpenAiCompatibleClient};
use async_trait::async_trait;
use conclave_application::{
    ConfigLookup, Construction, GenerateRequest, ModelProvider, ModelResponse, ProviderContext,
    ProviderError, ProviderFactory, RestrictionPolicy,
};
use conclave_domain::{CapabilityDescriptor, ProviderFamily, TemperatureConstraint};
use std::sync::Arc;
use tracing::{debug, info};

pub const GATEWAY_URL_KEY: &str = "UNIFIED_LLM_GATEWAY";
pub const GATEWAY_MODELS_KEY: &str = "UNIFIED_LLM_MODELS";
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8080/v1";
pub const CUSTOM_MODELS_KEY: &str = "CUSTOM_MODEL_NAMES";

/// Which names an endpoint accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelScope {
    /// Any name; the remote side rejects unknown models
    Any,
    /// Only the listed names (case-insensitive)
    Listed(Vec<String>),
}

impl ModelScope {
    /// Parse a comma-separated list; `None` or an empty list yields `fallback`
    pub fn from_list(value: Option<String>, fallback: ModelScope) -> Self {
        let names: Vec<String> = value
            .iter()
            .flat_map(|v| v.split(','))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if names.is_empty() {
            fallback
        } else {
            ModelScope::Listed(names)
        }
    }

    fn accepts(&self, name: &str) -> bool {
        match self {
            ModelScope::Any => !name.trim().is_empty(),
            ModelScope::Listed(names) => names.iter().any(|n| n.eq_ignore_ascii_case(name.trim())),
        }
    }

    fn canonical<'a>(&'a self, name: &'a str) -> &'a str {
        match self {
            ModelScope::Any => name.trim(),
            ModelScope::Listed(names) => names
                .iter()
                .find(|n| n.eq_ignore_ascii_case(name.trim()))
                .map_or(name.trim(), String::as_str),
        }
    }
}

/// Provider for one OpenAI-compatible endpoint
pub struct EndpointProvider {
    family: ProviderFamily,
    label: &'static str,
    scope: ModelScope,
    transport: Arc<dyn ChatTransport>,
    restrictions: Arc<dyn RestrictionPolicy>,
}

impl EndpointProvider {
    pub fn new(
        family: ProviderFamily,
        label: &'static str,
        scope: ModelScope,
        transport: Arc<dyn ChatTransport>,
        restrictions: Arc<dyn RestrictionPolicy>,
    ) -> Self {
        Self {
            family,
            label,
            scope,
            transport,
            restrictions,
        }
    }

    /// Name as the endpoint spells it, if in scope and allowed
    fn permitted<'a>(&'a self, model_name: &'a str) -> Option<&'a str> {
        if !self.scope.accepts(model_name) {
            return None;
        }
        let name = self.scope.canonical(model_name);
        self.restrictions.is_allowed(self.family, name).then_some(name)
    }

    fn descriptor(&self, model_name: &str) -> CapabilityDescriptor {
        CapabilityDescriptor::new(
            model_name,
            format!("{} ({model_name})", self.label),
            self.family,
        )
        .with_limits(128_000, 4_096)
        .with_images(true)
        .with_temperature(TemperatureConstraint::range(0.0, 2.0, 0.7))
    }
}

#[async_trait]
impl ModelProvider for EndpointProvider {
    fn family(&self) -> ProviderFamily {
        self.family
    }

    fn list_models(&self, respect_restrictions: bool) -> Vec<String> {
        match &self.scope {
            ModelScope::Any => Vec::new(),
            ModelScope::Listed(names) => names
                .iter()
                .filter(|name| {
                    !respect_restrictions || self.restrictions.is_allowed(self.family, name)
                })
                .cloned()
                .collect(),
        }
    }

    fn applies_restrictions(&self) -> bool {
        true
    }

    fn validate(&self, model_name: &str) -> bool {
        self.permitted(model_name).is_some()
    }

    fn capabilities(&self, model_name: &str) -> Result<CapabilityDescriptor, ProviderError> {
        if !self.scope.accepts(model_name) {
            return Err(ProviderError::UnsupportedModel(model_name.to_string()));
        }
        Ok(self.descriptor(self.scope.canonical(model_name)))
    }

    async fn invoke(&self, request: &GenerateRequest) -> Result<ModelResponse, ProviderError> {
        let name = self
            .permitted(&request.model_name)
            .ok_or_else(|| ProviderError::UnsupportedModel(request.model_name.clone()))?;
        let descriptor = self.descriptor(name);
        let completion = self
            .transport
            .complete(descriptor.model_name(), request)
            .await?;
        Ok(ModelResponse::new(completion.content, &descriptor).with_usage(completion.usage))
    }
}

/// Normalise a gateway URL so it ends in `/v1`
pub fn gateway_base_url(config: &dyn ConfigLookup) -> String {
    let url = config
        .get_config(GATEWAY_URL_KEY)
        .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string());
    let trimmed = url.trim_end_matches('/');
    if trimmed.ends_with("/v1") {
        trimmed.to_string()
    } else {
        format!("{trimmed}/v1")
    }
}

/// Factory for the unified gateway family
///
/// Active only when the gateway URL or key is configured, so an unused
/// gateway never shadows lower-priority families.
#[derive(Debug, Clone, Copy, Default)]
pub struct GatewayFactory;

impl ProviderFactory for GatewayFactory {
    fn name(&self) -> &str {
        "gateway"
    }

    fn requires_credential(&self) -> bool {
        false
    }

    fn construct(&self, context: &ProviderContext<'_>) -> Construction {
        let configured = context.config.get_config(GATEWAY_URL_KEY).is_some();
        if !configured && context.credential.is_none() {
            return Construction::unavailable(format!(
                "neither {GATEWAY_URL_KEY} nor UNIFIED_LLM_API_KEY is set"
            ));
        }

        let base_url = gateway_base_url(context.config);
        let scope = ModelScope::from_list(
            context.config.get_config(GATEWAY_MODELS_KEY),
            ModelScope::Any,
        );
        info!(url = %base_url, "Gateway provider enabled");

        let transport = OpenAiCompatibleClient::new(base_url, context.credential.clone());
        Construction::Constructed(Arc::new(EndpointProvider::new(
            ProviderFamily::Gateway,
            "Gateway Model",
            scope,
            Arc::new(transport),
            Arc::clone(&context.restrictions),
        )))
    }
}

/// Factory for a self-hosted endpoint
///
/// The registry guarantees an endpoint before calling this. The key is
/// optional (local servers usually ignore it).
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomFactory;

impl ProviderFactory for CustomFactory {
    fn name(&self) -> &str {
        "custom"
    }

    fn requires_credential(&self) -> bool {
        false
    }

    fn construct(&self, context: &ProviderContext<'_>) -> Construction {
        let Some(url) = context.endpoint.clone() else {
            return Construction::unavailable("CUSTOM_API_URL is not set");
        };
        let scope = ModelScope::from_list(
            context.config.get_config(CUSTOM_MODELS_KEY),
            ModelScope::Listed(Vec::new()),
        );
        if scope == ModelScope::Listed(Vec::new()) {
            debug!(url = %url, "Custom endpoint configured without {}", CUSTOM_MODELS_KEY);
        }

        let transport = OpenAiCompatibleClient::new(url, context.credential.clone());
        Construction::Constructed(Arc::new(EndpointProvider::new(
            ProviderFamily::Custom,
            "Custom Model",
            scope,
            Arc::new(transport),
            Arc::clone(&context.restrictions),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::http::Completion;
    use conclave_application::{AllowAll, StaticConfig, TokenUsage};

    struct Echo;

    #[async_trait]
    impl ChatTransport for Echo {
        async fn complete(
            &self,
            model: &str,
            request: &GenerateRequest,
        ) -> Result<Completion, ProviderError> {
            Ok(Completion {
                content: format!("{model}: {}", request.prompt),
                usage: TokenUsage::default(),
            })
        }
    }

    fn context<'a>(
        family: ProviderFamily,
        credential: Option<&str>,
        endpoint: Option<&str>,
        config: &'a StaticConfig,
    ) -> ProviderContext<'a> {
        ProviderContext {
            family,
            credential: credential.map(str::to_string),
            credential_key: family.credential_key(),
            endpoint: endpoint.map(str::to_string),
            config,
            restrictions: Arc::new(AllowAll),
        }
    }

    #[test]
    fn test_model_scope_parsing() {
        assert_eq!(
            ModelScope::from_list(Some(" llama3.2 , ,qwen2.5 ".to_string()), ModelScope::Any),
            ModelScope::Listed(vec!["llama3.2".to_string(), "qwen2.5".to_string()])
        );
        assert_eq!(ModelScope::from_list(None, ModelScope::Any), ModelScope::Any);
        assert_eq!(
            ModelScope::from_list(Some(",".to_string()), ModelScope::Any),
            ModelScope::Any
        );
    }

    #[test]
    fn test_gateway_url_normalisation() {
        assert_eq!(gateway_base_url(&StaticConfig::new()), DEFAULT_GATEWAY_URL);
        let config = StaticConfig::new().with(GATEWAY_URL_KEY, "http://bifrost:8080/");
        assert_eq!(gateway_base_url(&config), "http://bifrost:8080/v1");
        let config = StaticConfig::new().with(GATEWAY_URL_KEY, "http://litellm/v1/");
        assert_eq!(gateway_base_url(&config), "http://litellm/v1");
    }

    #[test]
    fn test_gateway_inactive_without_configuration() {
        let config = StaticConfig::new();
        let construction =
            GatewayFactory.construct(&context(ProviderFamily::Gateway, None, None, &config));
        assert!(matches!(construction, Construction::Unavailable { .. }));
    }

    #[test]
    fn test_gateway_accepts_any_model_when_unlisted() {
        let config = StaticConfig::new().with(GATEWAY_URL_KEY, "http://bifrost:8080");
        let Construction::Constructed(provider) =
            GatewayFactory.construct(&context(ProviderFamily::Gateway, None, None, &config))
        else {
            panic!("gateway should be active");
        };
        assert!(provider.validate("anything/at-all"));
        assert!(provider.list_models(true).is_empty());

        let descriptor = provider.capabilities("gpt-4o").unwrap();
        assert_eq!(descriptor.context_window(), 128_000);
        assert_eq!(descriptor.max_output_tokens(), 4_096);
        assert_eq!(descriptor.effective_temperature(3.0), 2.0);
    }

    #[test]
    fn test_gateway_restricted_to_listed_models() {
        let config = StaticConfig::new().with(GATEWAY_MODELS_KEY, "gpt-4o,claude-3-5-sonnet");
        let Construction::Constructed(provider) = GatewayFactory.construct(&context(
            ProviderFamily::Gateway,
            Some("sk-gateway"),
            None,
            &config,
        )) else {
            panic!("gateway should be active with a key");
        };
        assert!(provider.validate("GPT-4o"));
        assert!(!provider.validate("o3"));
        assert_eq!(provider.list_models(false), vec!["gpt-4o", "claude-3-5-sonnet"]);
    }

    #[test]
    fn test_custom_serves_only_listed_names() {
        let config = StaticConfig::new().with(CUSTOM_MODELS_KEY, "llama3.2");
        assert!(!CustomFactory.requires_credential());
        let Construction::Constructed(provider) = CustomFactory.construct(&context(
            ProviderFamily::Custom,
            None,
            Some("http://localhost:11434/v1"),
            &config,
        )) else {
            panic!("custom endpoint should construct");
        };
        assert_eq!(provider.family(), ProviderFamily::Custom);
        assert!(provider.validate("llama3.2"));
        assert!(!provider.validate("mistral"));
    }

    #[tokio::test]
    async fn test_endpoint_invoke_uses_listed_spelling() {
        let provider = EndpointProvider::new(
            ProviderFamily::Custom,
            "Custom Model",
            ModelScope::Listed(vec!["Llama3.2".to_string()]),
            Arc::new(Echo),
            Arc::new(AllowAll),
        );
        let response = provider
            .invoke(&GenerateRequest::new("llama3.2", "hi"))
            .await
            .unwrap();
        assert_eq!(response.content, "Llama3.2: hi");
        assert_eq!(response.model_name, "Llama3.2");
        assert_eq!(response.family, ProviderFamily::Custom);

        let error = provider
            .invoke(&GenerateRequest::new("other", "hi"))
            .await
            .unwrap_err();
        assert!(matches!(error, ProviderError::UnsupportedModel(_)));
    }
}
