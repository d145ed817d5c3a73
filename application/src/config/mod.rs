//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`ConsensusSettings`] - per-call timeout, temperature and completion policy

pub mod consensus_settings;

pub use consensus_settings::ConsensusSettings;
