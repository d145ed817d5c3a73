//! Capability descriptor value object
//!
//! One [`CapabilityDescriptor`] exists per canonical model name. It is built
//! once when a provider is constructed and never mutated afterwards; callers
//! only ever see shared references to it.

use super::family::ProviderFamily;
use serde::{Deserialize, Serialize};

/// Temperature rule a model enforces
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TemperatureConstraint {
    /// The model only accepts one value
    Fixed { value: f32 },
    /// Any value within `[min, max]`
    Range { min: f32, max: f32, default: f32 },
}

impl TemperatureConstraint {
    /// Range constraint; the bounds are stored in ascending order
    pub fn range(min: f32, max: f32, default: f32) -> Self {
        let (min, max) = if min > max { (max, min) } else { (min, max) };
        TemperatureConstraint::Range { min, max, default }
    }

    pub fn fixed(value: f32) -> Self {
        TemperatureConstraint::Fixed { value }
    }

    /// Bring a requested temperature into the accepted range.
    ///
    /// Never panics: deserialized bounds may be inverted or NaN, so they are
    /// ordered first and a NaN bound is ignored.
    pub fn clamp(&self, requested: f32) -> f32 {
        match *self {
            TemperatureConstraint::Fixed { value } => value,
            TemperatureConstraint::Range { min, max, .. } => {
                let (low, high) = if min > max { (max, min) } else { (min, max) };
                requested.max(low).min(high)
            }
        }
    }

    pub fn default_temperature(&self) -> f32 {
        match *self {
            TemperatureConstraint::Fixed { value } => value,
            TemperatureConstraint::Range { default, .. } => default,
        }
    }
}

/// Immutable metadata about one servable model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityDescriptor {
    model_name: String,
    friendly_name: String,
    family: ProviderFamily,
    context_window: u32,
    max_output_tokens: u32,
    supports_streaming: bool,
    supports_function_calling: bool,
    supports_json_mode: bool,
    supports_images: bool,
    supports_system_prompts: bool,
    supports_extended_thinking: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    temperature_constraint: Option<TemperatureConstraint>,
    #[serde(default)]
    aliases: Vec<String>,
}

impl CapabilityDescriptor {
    /// Start describing a model.
    ///
    /// Defaults: 128k context, 8192 output tokens, system prompts and
    /// streaming supported, everything else off.
    pub fn new(
        model_name: impl Into<String>,
        friendly_name: impl Into<String>,
        family: ProviderFamily,
    ) -> Self {
        Self {
            model_name: model_name.into(),
            friendly_name: friendly_name.into(),
            family,
            context_window: 128_000,
            max_output_tokens: 8_192,
            supports_streaming: true,
            supports_function_calling: false,
            supports_json_mode: false,
            supports_images: false,
            supports_system_prompts: true,
            supports_extended_thinking: false,
            temperature_constraint: None,
            aliases: Vec::new(),
        }
    }

    pub fn with_limits(mut self, context_window: u32, max_output_tokens: u32) -> Self {
        self.context_window = context_window;
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn with_streaming(mut self, enabled: bool) -> Self {
        self.supports_streaming = enabled;
        self
    }

    pub fn with_function_calling(mut self, enabled: bool) -> Self {
        self.supports_function_calling = enabled;
        self
    }

    pub fn with_json_mode(mut self, enabled: bool) -> Self {
        self.supports_json_mode = enabled;
        self
    }

    pub fn with_images(mut self, enabled: bool) -> Self {
        self.supports_images = enabled;
        self
    }

    pub fn with_system_prompts(mut self, enabled: bool) -> Self {
        self.supports_system_prompts = enabled;
        self
    }

    pub fn with_extended_thinking(mut self, enabled: bool) -> Self {
        self.supports_extended_thinking = enabled;
        self
    }

    pub fn with_temperature(mut self, constraint: TemperatureConstraint) -> Self {
        self.temperature_constraint = Some(constraint);
        self
    }

    /// Add aliases. Duplicates (case-insensitive) and the canonical name are skipped
    /// so the alias list stays an ordered set.
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for alias in aliases {
            let alias = alias.into();
            if alias.eq_ignore_ascii_case(&self.model_name)
                || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(&alias))
            {
                continue;
            }
            self.aliases.push(alias);
        }
        self
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn friendly_name(&self) -> &str {
        &self.friendly_name
    }

    pub fn family(&self) -> ProviderFamily {
        self.family
    }

    pub fn context_window(&self) -> u32 {
        self.context_window
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    pub fn supports_streaming(&self) -> bool {
        self.supports_streaming
    }

    pub fn supports_function_calling(&self) -> bool {
        self.supports_function_calling
    }

    pub fn supports_json_mode(&self) -> bool {
        self.supports_json_mode
    }

    pub fn supports_images(&self) -> bool {
        self.supports_images
    }

    pub fn supports_system_prompts(&self) -> bool {
        self.supports_system_prompts
    }

    pub fn supports_extended_thinking(&self) -> bool {
        self.supports_extended_thinking
    }

    pub fn temperature_constraint(&self) -> Option<&TemperatureConstraint> {
        self.temperature_constraint.as_ref()
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Does `name` refer to this model, either canonically or via an alias?
    pub fn matches(&self, name: &str) -> bool {
        let name = name.trim();
        self.model_name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    /// Effective temperature for a request, honouring the model's constraint
    pub fn effective_temperature(&self, requested: f32) -> f32 {
        match &self.temperature_constraint {
            Some(constraint) => constraint.clamp(requested),
            None => requested,
        }
    }
}
