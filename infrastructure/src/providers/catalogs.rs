//! Built-in model tables
//!
//! One table per catalog-backed family. Canonical names are what the
//! upstream API expects; aliases are the short names callers type.

use super::catalog::ModelCatalog;
use conclave_domain::{
    CapabilityDescriptor, ModelCategory, ProviderFamily, TemperatureConstraint,
};

/// Table for `family`, or `None` for families without a fixed catalog
/// (gateway, custom, CLI)
pub fn catalog_for(family: ProviderFamily) -> Option<ModelCatalog> {
    match family {
        ProviderFamily::Google => Some(google()),
        ProviderFamily::OpenAi => Some(openai()),
        ProviderFamily::Xai => Some(xai()),
        ProviderFamily::Dial => Some(dial()),
        ProviderFamily::Qwen => Some(qwen()),
        ProviderFamily::Moonshot => Some(moonshot()),
        ProviderFamily::Zai => Some(zai()),
        ProviderFamily::OpenRouter => Some(openrouter()),
        ProviderFamily::Gateway | ProviderFamily::Custom | ProviderFamily::Cli => None,
    }
}

fn standard_range() -> TemperatureConstraint {
    TemperatureConstraint::range(0.0, 2.0, 0.7)
}

fn google() -> ModelCatalog {
    let family = ProviderFamily::Google;
    let gemini_range = TemperatureConstraint::range(0.0, 2.0, 1.0);
    ModelCatalog::new(
        family,
        vec![
            CapabilityDescriptor::new("gemini-2.5-pro", "Gemini 2.5 Pro", family)
                .with_limits(1_048_576, 65_536)
                .with_extended_thinking(true)
                .with_function_calling(true)
                .with_json_mode(true)
                .with_images(true)
                .with_temperature(gemini_range)
                .with_aliases(["pro", "gemini-pro", "gemini pro"]),
            CapabilityDescriptor::new("gemini-2.5-flash", "Gemini 2.5 Flash", family)
                .with_limits(1_048_576, 65_536)
                .with_extended_thinking(true)
                .with_function_calling(true)
                .with_json_mode(true)
                .with_images(true)
                .with_temperature(gemini_range)
                .with_aliases(["flash", "flash-2.5"]),
            CapabilityDescriptor::new("gemini-2.0-flash", "Gemini 2.0 Flash", family)
                .with_limits(1_048_576, 8_192)
                .with_function_calling(true)
                .with_json_mode(true)
                .with_images(true)
                .with_temperature(gemini_range)
                .with_aliases(["flash-2.0", "flash2"]),
            CapabilityDescriptor::new("gemini-2.0-flash-lite", "Gemini 2.0 Flash Lite", family)
                .with_limits(1_048_576, 8_192)
                .with_json_mode(true)
                .with_temperature(gemini_range)
                .with_aliases(["flash-lite", "flashlite"]),
        ],
    )
    .with_preferences(
        ModelCategory::ExtendedReasoning,
        &["gemini-2.5-pro", "gemini-2.5-flash"],
    )
    .with_preferences(
        ModelCategory::FastResponse,
        &["gemini-2.5-flash", "gemini-2.0-flash", "gemini-2.0-flash-lite"],
    )
    .with_preferences(ModelCategory::Balanced, &["gemini-2.5-flash", "gemini-2.5-pro"])
}

fn openai() -> ModelCatalog {
    let family = ProviderFamily::OpenAi;
    // Reasoning models reject any temperature but 1.0
    let reasoning = TemperatureConstraint::fixed(1.0);
    ModelCatalog::new(
        family,
        vec![
            CapabilityDescriptor::new("o3", "OpenAI o3", family)
                .with_limits(200_000, 65_536)
                .with_streaming(false)
                .with_extended_thinking(true)
                .with_function_calling(true)
                .with_json_mode(true)
                .with_images(true)
                .with_temperature(reasoning),
            CapabilityDescriptor::new("o3-mini", "OpenAI o3-mini", family)
                .with_limits(200_000, 65_536)
                .with_extended_thinking(true)
                .with_function_calling(true)
                .with_json_mode(true)
                .with_temperature(reasoning)
                .with_aliases(["o3mini"]),
            CapabilityDescriptor::new("o4-mini", "OpenAI o4-mini", family)
                .with_limits(200_000, 65_536)
                .with_extended_thinking(true)
                .with_function_calling(true)
                .with_json_mode(true)
                .with_images(true)
                .with_temperature(reasoning)
                .with_aliases(["mini", "o4mini"]),
            CapabilityDescriptor::new("gpt-5", "GPT-5", family)
                .with_limits(400_000, 128_000)
                .with_extended_thinking(true)
                .with_function_calling(true)
                .with_json_mode(true)
                .with_images(true)
                .with_temperature(reasoning)
                .with_aliases(["gpt5"]),
            CapabilityDescriptor::new("gpt-4.1", "GPT-4.1", family)
                .with_limits(1_047_576, 32_768)
                .with_function_calling(true)
                .with_json_mode(true)
                .with_images(true)
                .with_temperature(standard_range())
                .with_aliases(["gpt4.1"]),
        ],
    )
    .with_preferences(ModelCategory::ExtendedReasoning, &["o3", "gpt-5", "o4-mini"])
    .with_preferences(ModelCategory::FastResponse, &["o4-mini", "o3-mini", "gpt-4.1"])
    .with_preferences(ModelCategory::Balanced, &["gpt-5", "gpt-4.1", "o4-mini"])
}

fn xai() -> ModelCatalog {
    let family = ProviderFamily::Xai;
    ModelCatalog::new(
        family,
        vec![
            CapabilityDescriptor::new("grok-4", "Grok 4", family)
                .with_limits(256_000, 32_768)
                .with_extended_thinking(true)
                .with_function_calling(true)
                .with_json_mode(true)
                .with_images(true)
                .with_temperature(standard_range())
                .with_aliases(["grok", "grok4"]),
            CapabilityDescriptor::new("grok-3", "Grok 3", family)
                .with_limits(131_072, 32_768)
                .with_function_calling(true)
                .with_json_mode(true)
                .with_temperature(standard_range())
                .with_aliases(["grok3"]),
            CapabilityDescriptor::new("grok-3-fast", "Grok 3 Fast", family)
                .with_limits(131_072, 32_768)
                .with_function_calling(true)
                .with_json_mode(true)
                .with_temperature(standard_range())
                .with_aliases(["grok3fast", "grokfast"]),
        ],
    )
    .with_preferences(ModelCategory::ExtendedReasoning, &["grok-4", "grok-3"])
    .with_preferences(ModelCategory::FastResponse, &["grok-3-fast", "grok-3"])
    .with_preferences(ModelCategory::Balanced, &["grok-3", "grok-4"])
}

fn dial() -> ModelCatalog {
    let family = ProviderFamily::Dial;
    ModelCatalog::new(
        family,
        vec![
            CapabilityDescriptor::new("o3-2025-04-16", "o3 (via DIAL)", family)
                .with_limits(200_000, 65_536)
                .with_extended_thinking(true)
                .with_temperature(TemperatureConstraint::fixed(1.0))
                .with_aliases(["dial-o3"]),
            CapabilityDescriptor::new("gemini-2.5-pro-preview-05-06", "Gemini 2.5 Pro (via DIAL)", family)
                .with_limits(1_000_000, 65_536)
                .with_extended_thinking(true)
                .with_images(true)
                .with_temperature(standard_range())
                .with_aliases(["dial-gemini-pro"]),
            CapabilityDescriptor::new("anthropic.claude-sonnet-4-20250514-v1:0", "Claude Sonnet 4 (via DIAL)", family)
                .with_limits(200_000, 64_000)
                .with_images(true)
                .with_temperature(TemperatureConstraint::range(0.0, 1.0, 0.7))
                .with_aliases(["dial-sonnet-4"]),
        ],
    )
    .with_preferences(
        ModelCategory::ExtendedReasoning,
        &["o3-2025-04-16", "gemini-2.5-pro-preview-05-06"],
    )
    .with_preferences(
        ModelCategory::Balanced,
        &["anthropic.claude-sonnet-4-20250514-v1:0", "gemini-2.5-pro-preview-05-06"],
    )
}

fn qwen() -> ModelCatalog {
    let family = ProviderFamily::Qwen;
    ModelCatalog::new(
        family,
        vec![
            CapabilityDescriptor::new("qwen3-max", "Qwen3 Max", family)
                .with_limits(262_144, 32_768)
                .with_extended_thinking(true)
                .with_temperature(standard_range())
                .with_aliases(["qwen3max", "qwen-max"]),
            CapabilityDescriptor::new("qwen-plus", "Qwen Plus", family)
                .with_limits(131_072, 32_768)
                .with_temperature(standard_range())
                .with_aliases(["qwen2-plus"]),
            CapabilityDescriptor::new("qwen3-0.6b", "Qwen3 0.6B", family)
                .with_limits(32_768, 8_192)
                .with_temperature(standard_range()),
        ],
    )
    .with_preferences(ModelCategory::ExtendedReasoning, &["qwen3-max"])
    .with_preferences(ModelCategory::FastResponse, &["qwen-plus", "qwen3-0.6b"])
}

fn moonshot() -> ModelCatalog {
    let family = ProviderFamily::Moonshot;
    ModelCatalog::new(
        family,
        vec![
            CapabilityDescriptor::new("kimi-k2-instruct", "Kimi K2", family)
                .with_limits(262_144, 32_768)
                .with_extended_thinking(true)
                .with_temperature(TemperatureConstraint::range(0.0, 1.0, 0.6))
                .with_aliases(["kimi", "kimi-k2"]),
        ],
    )
    .with_preferences(ModelCategory::ExtendedReasoning, &["kimi-k2-instruct"])
}

fn zai() -> ModelCatalog {
    let family = ProviderFamily::Zai;
    let glm_range = TemperatureConstraint::range(0.0, 2.0, 1.0);
    ModelCatalog::new(
        family,
        vec![
            CapabilityDescriptor::new("glm-4.5", "GLM-4.5", family)
                .with_limits(262_144, 32_768)
                .with_extended_thinking(true)
                .with_temperature(glm_range)
                .with_aliases(["glm", "glm45"]),
            CapabilityDescriptor::new("glm-4.5-air", "GLM-4.5 Air", family)
                .with_limits(131_072, 32_768)
                .with_temperature(glm_range)
                .with_aliases(["glm-air"]),
        ],
    )
    .with_preferences(ModelCategory::ExtendedReasoning, &["glm-4.5"])
    .with_preferences(ModelCategory::FastResponse, &["glm-4.5-air"])
}

fn openrouter() -> ModelCatalog {
    let family = ProviderFamily::OpenRouter;
    ModelCatalog::new(
        family,
        vec![
            CapabilityDescriptor::new("anthropic/claude-sonnet-4", "Claude Sonnet 4", family)
                .with_limits(200_000, 64_000)
                .with_function_calling(true)
                .with_images(true)
                .with_temperature(TemperatureConstraint::range(0.0, 1.0, 0.7))
                .with_aliases(["sonnet", "sonnet4", "claude-sonnet"]),
            CapabilityDescriptor::new("anthropic/claude-opus-4.1", "Claude Opus 4.1", family)
                .with_limits(200_000, 32_000)
                .with_extended_thinking(true)
                .with_function_calling(true)
                .with_images(true)
                .with_temperature(TemperatureConstraint::range(0.0, 1.0, 0.7))
                .with_aliases(["opus", "opus4.1", "claude-opus"]),
            CapabilityDescriptor::new("anthropic/claude-3.5-haiku", "Claude 3.5 Haiku", family)
                .with_limits(200_000, 8_192)
                .with_temperature(TemperatureConstraint::range(0.0, 1.0, 0.7))
                .with_aliases(["haiku", "claude-haiku"]),
            CapabilityDescriptor::new("meta-llama/llama-4-maverick", "Llama 4 Maverick", family)
                .with_limits(1_048_576, 16_384)
                .with_images(true)
                .with_temperature(standard_range())
                .with_aliases(["llama", "llama4", "maverick"]),
            CapabilityDescriptor::new("deepseek/deepseek-r1", "DeepSeek R1", family)
                .with_limits(163_840, 32_768)
                .with_extended_thinking(true)
                .with_temperature(standard_range())
                .with_aliases(["deepseek", "r1", "deepseek-r1"]),
            CapabilityDescriptor::new("mistralai/mistral-large", "Mistral Large", family)
                .with_limits(128_000, 32_768)
                .with_function_calling(true)
                .with_json_mode(true)
                .with_temperature(standard_range())
                .with_aliases(["mistral", "mistral-large"]),
        ],
    )
    .with_preferences(
        ModelCategory::ExtendedReasoning,
        &["anthropic/claude-opus-4.1", "deepseek/deepseek-r1", "anthropic/claude-sonnet-4"],
    )
    .with_preferences(
        ModelCategory::FastResponse,
        &["anthropic/claude-3.5-haiku", "mistralai/mistral-large"],
    )
    .with_preferences(
        ModelCategory::Balanced,
        &["anthropic/claude-sonnet-4", "meta-llama/llama-4-maverick"],
    )
}
