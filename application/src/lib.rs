//! Application layer for conclave
//!
//! This crate contains the provider registry, the consensus use case, port
//! definitions, and application configuration. It depends only on the
//! domain layer.

pub mod config;
pub mod ports;
pub mod registry;
pub mod use_cases;

// Re-export commonly used types
pub use config::ConsensusSettings;
pub use ports::{
    config_lookup::{ConfigLookup, StaticConfig},
    model_provider::{
        Construction, GenerateRequest, ModelProvider, ModelResponse, ProviderContext,
        ProviderError, ProviderFactory, TokenUsage,
    },
    progress::{NoProgress, ProgressNotifier},
    restriction::{AllowAll, RestrictionPolicy},
};
pub use registry::{DEFAULT_FALLBACK_MODEL, ProviderRegistry};
pub use use_cases::run_consensus::{LegacyContinuation, RunConsensusError, RunConsensusUseCase};
