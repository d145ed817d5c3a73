//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod config_lookup;
pub mod model_provider;
pub mod progress;
pub mod restriction;
