//! Consensus result value objects
//!
//! The serialized shape of [`ConsensusResultDocument`] is consumed by calling
//! agents, so field names and status strings are fixed:
//! - [`ModelStanceResult`] - outcome of one (model, stance) consultation
//! - [`ConsensusSummary`] - counts over all results
//! - [`ConsensusMetadata`] - which model/category ran the surrounding step
//! - [`ConsensusResultDocument`] - the complete document

use super::request::ModelStanceRequest;
use super::stance::Stance;
use crate::providers::ModelCategory;
use serde::{Deserialize, Serialize};

/// Document-level status sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsensusStatus {
    /// Every requested pair has settled
    #[serde(rename = "consensus_workflow_complete")]
    Complete,
    /// Reported for legacy sequential steps other than 1
    #[serde(rename = "consensus_in_progress")]
    InProgress,
}

impl ConsensusStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsensusStatus::Complete => "consensus_workflow_complete",
            ConsensusStatus::InProgress => "consensus_in_progress",
        }
    }
}

impl std::fmt::Display for ConsensusStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a single pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairStatus {
    Success,
    Error,
}

/// Result of consulting one model under one stance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelStanceResult {
    pub model: String,
    pub stance: Stance,
    pub status: PairStatus,
    pub content: Option<String>,
    pub error_message: Option<String>,
    /// Wall-clock time spent on this pair, in milliseconds
    pub latency: u64,
}

impl ModelStanceResult {
    pub fn success(pair: &ModelStanceRequest, content: impl Into<String>, latency: u64) -> Self {
        Self {
            model: pair.model.clone(),
            stance: pair.stance.clone(),
            status: PairStatus::Success,
            content: Some(content.into()),
            error_message: None,
            latency,
        }
    }

    pub fn error(pair: &ModelStanceRequest, message: impl Into<String>, latency: u64) -> Self {
        Self {
            model: pair.model.clone(),
            stance: pair.stance.clone(),
            status: PairStatus::Error,
            content: None,
            error_message: Some(message.into()),
            latency,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == PairStatus::Success
    }

    pub fn pair_label(&self) -> String {
        format!("{}:{}", self.model, self.stance)
    }
}

/// Aggregate counts over a result list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusSummary {
    pub requested_count: usize,
    pub succeeded_count: usize,
    pub errored_count: usize,
    /// `model:stance` labels in request order
    pub consulted_pairs: Vec<String>,
}

impl ConsensusSummary {
    pub fn from_results(results: &[ModelStanceResult]) -> Self {
        let succeeded_count = results.iter().filter(|r| r.is_success()).count();
        Self {
            requested_count: results.len(),
            succeeded_count,
            errored_count: results.len() - succeeded_count,
            consulted_pairs: results.iter().map(ModelStanceResult::pair_label).collect(),
        }
    }

    pub fn all_failed(&self) -> bool {
        self.requested_count > 0 && self.succeeded_count == 0
    }
}

/// Observability block describing the surrounding workflow step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusMetadata {
    pub tool_name: String,
    pub workflow_type: String,
    pub execution_mode: String,
    /// Model executing the surrounding workflow step
    pub model_used: Option<String>,
    pub model_category: ModelCategory,
    pub models_consulted: Vec<String>,
}

impl ConsensusMetadata {
    pub const TOOL_NAME: &'static str = "consensus";
    pub const WORKFLOW_TYPE: &'static str = "concurrent_multi_model_consensus";
    pub const EXECUTION_MODE: &'static str = "concurrent";

    pub fn new(
        model_used: Option<String>,
        model_category: ModelCategory,
        models_consulted: Vec<String>,
    ) -> Self {
        Self {
            tool_name: Self::TOOL_NAME.to_string(),
            workflow_type: Self::WORKFLOW_TYPE.to_string(),
            execution_mode: Self::EXECUTION_MODE.to_string(),
            model_used,
            model_category,
            models_consulted,
        }
    }
}

/// The complete, auditable output of a consensus step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusResultDocument {
    pub status: ConsensusStatus,
    pub step_number: u32,
    pub total_steps: u32,
    pub next_step_required: bool,
    pub consensus_complete: bool,
    /// One entry per requested pair, in request order
    pub results: Vec<ModelStanceResult>,
    pub summary: ConsensusSummary,
    pub metadata: ConsensusMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation_id: Option<String>,
    /// Guidance for the calling agent on what to do with the results
    #[serde(default)]
    pub next_steps: String,
}

impl ConsensusResultDocument {
    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a document previously produced by [`Self::to_json`]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Results that failed, for selective retry
    pub fn failed_pairs(&self) -> impl Iterator<Item = &ModelStanceResult> {
        self.results.iter().filter(|r| !r.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConsensusResultDocument {
        let ok = ModelStanceRequest::new("flash", "neutral");
        let bad = ModelStanceRequest::new("o3", "for");
        let results = vec![
            ModelStanceResult::success(&ok, "Flash analysis", 500),
            ModelStanceResult::error(&bad, "Model timeout", 30_000),
        ];
        let summary = ConsensusSummary::from_results(&results);
        ConsensusResultDocument {
            status: ConsensusStatus::Complete,
            step_number: 1,
            total_steps: 1,
            next_step_required: false,
            consensus_complete: true,
            metadata: ConsensusMetadata::new(
                Some("flash".to_string()),
                ModelCategory::ExtendedReasoning,
                summary.consulted_pairs.clone(),
            ),
            results,
            summary,
            continuation_id: None,
            next_steps: "Synthesize".to_string(),
        }
    }

    #[test]
    fn test_summary_counts() {
        let doc = sample();
        assert_eq!(doc.summary.requested_count, 2);
        assert_eq!(doc.summary.succeeded_count, 1);
        assert_eq!(doc.summary.errored_count, 1);
        assert_eq!(doc.summary.consulted_pairs, vec!["flash:neutral", "o3:for"]);
        assert!(!doc.summary.all_failed());
        assert_eq!(doc.failed_pairs().count(), 1);
    }

    #[test]
    fn test_json_field_names_and_sentinels() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["status"], "consensus_workflow_complete");
        assert_eq!(value["consensus_complete"], true);
        assert_eq!(value["results"][0]["status"], "success");
        assert_eq!(value["results"][1]["status"], "error");
        assert_eq!(value["results"][1]["content"], serde_json::Value::Null);
        assert_eq!(value["results"][1]["error_message"], "Model timeout");
        assert_eq!(value["results"][0]["latency"], 500);
        assert_eq!(value["summary"]["requested_count"], 2);
        assert_eq!(
            value["metadata"]["workflow_type"],
            "concurrent_multi_model_consensus"
        );
        assert_eq!(value["metadata"]["model_category"], "extended_reasoning");
        assert!(value.get("continuation_id").is_none());
    }

    #[test]
    fn test_document_roundtrip_preserves_order_and_counts() {
        let doc = sample();
        let json = doc.to_json().unwrap();
        let parsed = ConsensusResultDocument::from_json(&json).unwrap();
        assert_eq!(parsed, doc);
        assert_eq!(parsed.results[0].model, "flash");
        assert_eq!(parsed.results[1].model, "o3");
        assert_eq!(parsed.summary, doc.summary);
    }

    #[test]
    fn test_all_failed() {
        let pair = ModelStanceRequest::new("o3", "for");
        let summary =
            ConsensusSummary::from_results(&[ModelStanceResult::error(&pair, "boom", 1)]);
        assert!(summary.all_failed());
        assert!(!ConsensusSummary::default().all_failed());
    }
}
