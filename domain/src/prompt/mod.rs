//! Prompt templates

mod template;

pub use template::{BALANCED_MARKER, CRITICAL_MARKER, ConsensusPromptTemplate, SUPPORTIVE_MARKER};
