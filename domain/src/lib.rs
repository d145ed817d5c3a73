//! Domain layer for conclave
//!
//! This crate contains the core business types shared by every other layer.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Provider families
//!
//! A [`ProviderFamily`] tags a class of backend that can serve models
//! (native API, OpenAI-compatible gateway, self-hosted endpoint, local CLI,
//! catch-all aggregator). Families carry a fixed total order that doubles as
//! routing priority.
//!
//! ## Capability descriptors
//!
//! Every servable model is described by exactly one immutable
//! [`CapabilityDescriptor`], reachable by canonical name or alias.
//!
//! ## Consensus
//!
//! A [`ConsensusRequest`] asks several (model, stance) pairs the same
//! question. The orchestrator answers with a [`ConsensusResultDocument`]
//! whose field names are part of the external contract.

pub mod consensus;
pub mod core;
pub mod prompt;
pub mod providers;

// Re-export commonly used types
pub use consensus::{
    ConsensusMetadata, ConsensusRequest, ConsensusResultDocument, ConsensusStatus,
    ConsensusSummary, ModelStanceRequest, ModelStanceResult, PairStatus, Stance,
};
pub use core::error::DomainError;
pub use prompt::ConsensusPromptTemplate;
pub use providers::{
    CapabilityDescriptor, ModelCategory, ProviderFamily, TemperatureConstraint,
};
