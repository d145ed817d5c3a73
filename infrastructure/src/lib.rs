//! Infrastructure layer for conclave
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: backend providers, configuration loading and lookup,
//! and the restriction policy.

pub mod config;
pub mod policy;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, EnvConfig, FileConfig, FileConsensusConfig,
    FileOutputConfig, FileOutputFormat, LayeredConfig,
};
pub use policy::EnvRestrictionPolicy;
pub use providers::{
    CatalogProvider, CliBridgeFactory, CliBridgeProvider, CliTool, CustomFactory,
    EndpointProvider, GatewayFactory, ModelCatalog, NativeFactory, configure_providers,
};
