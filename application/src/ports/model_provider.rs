//! Model provider port
//!
//! Defines the contract every backend (native API, OpenAI-compatible
//! endpoint, local CLI tool) implements, and the factory through which the
//! registry constructs backends lazily.

use super::config_lookup::ConfigLookup;
use super::restriction::RestrictionPolicy;
use async_trait::async_trait;
use conclave_domain::{CapabilityDescriptor, ModelCategory, ProviderFamily};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors a single backend invocation can produce
///
/// These never fail a consensus batch; the orchestrator turns them into
/// per-pair error entries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Model '{0}' is not supported by this provider")]
    UnsupportedModel(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Command failed with exit code {exit_code:?}: {stderr}")]
    CommandFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Binary not found: {0}")]
    BinaryNotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::Timeout(_))
    }
}

/// A single generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub prompt: String,
    /// Name or alias as given by the caller
    pub model_name: String,
    pub system_prompt: Option<String>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl GenerateRequest {
    pub fn new(model_name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model_name: model_name.into(),
            system_prompt: None,
            temperature: None,
            max_output_tokens: None,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }
}

/// Token accounting reported by a backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// A successful backend response
#[derive(Debug, Clone, PartialEq)]
pub struct ModelResponse {
    pub content: String,
    pub usage: TokenUsage,
    /// Canonical model name that served the request
    pub model_name: String,
    pub friendly_name: String,
    pub family: ProviderFamily,
    pub metadata: BTreeMap<String, String>,
}

impl ModelResponse {
    pub fn new(content: impl Into<String>, descriptor: &CapabilityDescriptor) -> Self {
        Self {
            content: content.into(),
            usage: TokenUsage::default(),
            model_name: descriptor.model_name().to_string(),
            friendly_name: descriptor.friendly_name().to_string(),
            family: descriptor.family(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = usage;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// A constructed backend able to serve one or more models
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Family this provider belongs to
    fn family(&self) -> ProviderFamily;

    /// Canonical names this provider advertises.
    ///
    /// With `respect_restrictions`, providers that return `true` from
    /// [`Self::applies_restrictions`] filter the list themselves.
    fn list_models(&self, respect_restrictions: bool) -> Vec<String>;

    /// Whether `list_models(true)` is already restriction-filtered
    fn applies_restrictions(&self) -> bool {
        false
    }

    /// Whether this provider can serve `model_name` (canonical or alias)
    fn validate(&self, model_name: &str) -> bool;

    fn capabilities(&self, model_name: &str) -> Result<CapabilityDescriptor, ProviderError>;

    /// Nominate a model from `allowed` for the given category
    fn preferred_model(&self, _category: ModelCategory, _allowed: &[String]) -> Option<String> {
        None
    }

    async fn invoke(&self, request: &GenerateRequest) -> Result<ModelResponse, ProviderError>;
}

/// Everything a factory may consult when building its provider
pub struct ProviderContext<'a> {
    pub family: ProviderFamily,
    /// Credential resolved for the family, if any
    pub credential: Option<String>,
    /// Configuration key the credential was read from
    pub credential_key: Option<&'static str>,
    /// Endpoint resolved for the family, if any
    pub endpoint: Option<String>,
    pub config: &'a dyn ConfigLookup,
    pub restrictions: Arc<dyn RestrictionPolicy>,
}

/// Outcome of a construction attempt
pub enum Construction {
    Constructed(Arc<dyn ModelProvider>),
    Unavailable { reason: String },
}

impl Construction {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Construction::Unavailable {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Debug for Construction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Construction::Constructed(provider) => f
                .debug_tuple("Constructed")
                .field(&provider.family())
                .finish(),
            Construction::Unavailable { reason } => f
                .debug_struct("Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}

/// Registered in the [`ProviderRegistry`](crate::registry::ProviderRegistry)
/// in place of a live provider; invoked on first use.
pub trait ProviderFactory: Send + Sync {
    /// Short identifier used in logs (e.g. "openai", "codex-cli")
    fn name(&self) -> &str;

    /// When true, the registry skips construction if no credential resolves
    fn requires_credential(&self) -> bool {
        true
    }

    fn construct(&self, context: &ProviderContext<'_>) -> Construction;
}
