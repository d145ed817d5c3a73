//! Consensus domain
//!
//! "Consensus" here means ensemble querying: the same proposal is put to
//! several models, each under an argumentative [`Stance`], and the answers
//! are collected side by side for the calling agent to synthesize.
//!
//! ```text
//! ConsensusRequest ──validate──▶ [(model, stance), ...]
//!                                      │  fan-out (one task per pair)
//!                                      ▼
//!                          [ModelStanceResult, ...]  (request order)
//!                                      │
//!                                      ▼
//!                          ConsensusResultDocument
//! ```

pub mod request;
pub mod result;
pub mod stance;

pub use request::{ConsensusRequest, ModelStanceRequest};
pub use result::{
    ConsensusMetadata, ConsensusResultDocument, ConsensusStatus, ConsensusSummary,
    ModelStanceResult, PairStatus,
};
pub use stance::Stance;
