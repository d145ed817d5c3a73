//! Provider family value object

use serde::{Deserialize, Serialize};

/// Category of backend that can serve models (Value Object)
///
/// Variants are declared in routing priority order and the derived `Ord`
/// follows that order: native APIs first, then gateway and self-hosted
/// endpoints, then local CLI tools, then the catch-all aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderFamily {
    /// Direct Gemini API
    Google,
    /// Direct OpenAI API
    #[serde(rename = "openai")]
    OpenAi,
    /// Direct X.AI (Grok) API
    Xai,
    /// DIAL unified API
    Dial,
    /// Native Qwen (DashScope) API
    Qwen,
    /// Native Moonshot (Kimi) API
    Moonshot,
    /// Native Z.ai (GLM) API
    Zai,
    /// OpenAI-compatible unified gateway (Bifrost, LiteLLM)
    Gateway,
    /// Self-hosted OpenAI-compatible endpoint (Ollama, vLLM, LM Studio)
    Custom,
    /// Local CLI tools (codex, gemini)
    Cli,
    /// Catch-all cloud aggregator
    #[serde(rename = "openrouter")]
    OpenRouter,
}

impl ProviderFamily {
    /// Routing priority order. Resolution walks families in exactly this order.
    pub const PRIORITY_ORDER: [ProviderFamily; 11] = [
        ProviderFamily::Google,
        ProviderFamily::OpenAi,
        ProviderFamily::Xai,
        ProviderFamily::Dial,
        ProviderFamily::Qwen,
        ProviderFamily::Moonshot,
        ProviderFamily::Zai,
        ProviderFamily::Gateway,
        ProviderFamily::Custom,
        ProviderFamily::Cli,
        ProviderFamily::OpenRouter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderFamily::Google => "google",
            ProviderFamily::OpenAi => "openai",
            ProviderFamily::Xai => "xai",
            ProviderFamily::Dial => "dial",
            ProviderFamily::Qwen => "qwen",
            ProviderFamily::Moonshot => "moonshot",
            ProviderFamily::Zai => "zai",
            ProviderFamily::Gateway => "gateway",
            ProviderFamily::Custom => "custom",
            ProviderFamily::Cli => "cli",
            ProviderFamily::OpenRouter => "openrouter",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderFamily::Google => "Google Gemini",
            ProviderFamily::OpenAi => "OpenAI",
            ProviderFamily::Xai => "X.AI",
            ProviderFamily::Dial => "DIAL",
            ProviderFamily::Qwen => "Qwen",
            ProviderFamily::Moonshot => "Moonshot",
            ProviderFamily::Zai => "Z.ai",
            ProviderFamily::Gateway => "Unified Gateway",
            ProviderFamily::Custom => "Custom Endpoint",
            ProviderFamily::Cli => "Local CLI",
            ProviderFamily::OpenRouter => "OpenRouter",
        }
    }

    /// Position of this family in [`Self::PRIORITY_ORDER`] (0 = highest)
    pub fn priority(&self) -> usize {
        *self as usize
    }

    /// Configuration key holding the credential for this family.
    ///
    /// The aggregator family has two candidate keys and is special-cased by
    /// the registry; this returns its primary key.
    pub fn credential_key(&self) -> Option<&'static str> {
        match self {
            ProviderFamily::Google => Some("GEMINI_API_KEY"),
            ProviderFamily::OpenAi => Some("OPENAI_API_KEY"),
            ProviderFamily::Xai => Some("XAI_API_KEY"),
            ProviderFamily::Dial => Some("DIAL_API_KEY"),
            ProviderFamily::Qwen => Some("QWEN_API_KEY"),
            ProviderFamily::Moonshot => Some("MOONSHOT_API_KEY"),
            ProviderFamily::Zai => Some("ZAI_API_KEY"),
            ProviderFamily::Gateway => Some("UNIFIED_LLM_API_KEY"),
            ProviderFamily::Custom => Some("CUSTOM_API_KEY"),
            ProviderFamily::Cli => None,
            ProviderFamily::OpenRouter => Some("OPENROUTER_API_KEY"),
        }
    }

    /// Configuration key holding a mandatory endpoint URL, if the family needs one
    pub fn endpoint_key(&self) -> Option<&'static str> {
        match self {
            ProviderFamily::Custom => Some("CUSTOM_API_URL"),
            _ => None,
        }
    }

    /// Configuration key listing the models a deployment may use from this family
    pub fn restriction_key(&self) -> String {
        format!("{}_ALLOWED_MODELS", self.as_str().to_ascii_uppercase())
    }
}

impl std::fmt::Display for ProviderFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        ProviderFamily::PRIORITY_ORDER
            .into_iter()
            .find(|family| family.as_str() == normalized)
            .or(match normalized.as_str() {
                "gemini" => Some(ProviderFamily::Google),
                "x.ai" | "grok" => Some(ProviderFamily::Xai),
                "kilo" => Some(ProviderFamily::OpenRouter),
                _ => None,
            })
            .ok_or_else(|| format!("Unknown provider family: {s}"))
    }
}
