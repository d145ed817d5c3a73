//! Provider registry
//!
//! The single source of truth mapping a model name to a usable
//! [`ModelProvider`](crate::ports::model_provider::ModelProvider).

pub mod provider_registry;

pub use provider_registry::{DEFAULT_FALLBACK_MODEL, ProviderRegistry};
