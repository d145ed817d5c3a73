//! Output formatter trait

use conclave_domain::ConsensusResultDocument;

/// Trait for formatting consensus results
pub trait OutputFormatter {
    /// Format every consultation in full
    fn format(&self, proposal: &str, document: &ConsensusResultDocument) -> String;

    /// Format as JSON
    fn format_json(&self, document: &ConsensusResultDocument) -> String;

    /// Format counts and one line per consultation
    fn format_summary(&self, proposal: &str, document: &ConsensusResultDocument) -> String;
}
