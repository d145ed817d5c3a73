//! Consensus request (one workflow step)

use super::stance::Stance;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One (model, stance) pair the caller wants consulted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelStanceRequest {
    /// Model name or alias
    pub model: String,
    /// Framing for this consultation
    #[serde(default)]
    pub stance: Stance,
    /// Replaces the canned stance preamble entirely when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stance_prompt: Option<String>,
}

impl ModelStanceRequest {
    pub fn new(model: impl Into<String>, stance: impl Into<Stance>) -> Self {
        Self {
            model: model.into(),
            stance: stance.into(),
            stance_prompt: None,
        }
    }

    pub fn with_stance_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.stance_prompt = Some(prompt.into());
        self
    }

    /// `model:stance` label used in summaries and logs
    pub fn pair_label(&self) -> String {
        format!("{}:{}", self.model, self.stance)
    }
}

/// A consensus workflow step as sent by the calling agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusRequest {
    /// The proposal or question under consideration
    #[serde(alias = "step")]
    pub step_text: String,
    pub step_number: u32,
    /// Caller's hint; the orchestrator overrides it
    pub total_steps: u32,
    pub next_step_required: bool,
    /// The calling agent's own analysis so far
    #[serde(default)]
    pub findings: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
    /// Required on step 1, optional afterwards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<ModelStanceRequest>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation_id: Option<String>,
    /// Model executing the surrounding workflow (recorded in metadata)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ConsensusRequest {
    /// Create a first-step request consulting the given pairs
    pub fn initial(step_text: impl Into<String>, models: Vec<ModelStanceRequest>) -> Self {
        Self {
            step_text: step_text.into(),
            step_number: 1,
            total_steps: 1,
            next_step_required: false,
            findings: String::new(),
            confidence: None,
            models: Some(models),
            continuation_id: None,
            model: None,
        }
    }

    pub fn with_findings(mut self, findings: impl Into<String>) -> Self {
        self.findings = findings.into();
        self
    }

    pub fn with_continuation(mut self, continuation_id: impl Into<String>) -> Self {
        self.continuation_id = Some(continuation_id.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn is_initial_step(&self) -> bool {
        self.step_number == 1
    }

    /// The requested pairs, or an empty slice on later steps
    pub fn pairs(&self) -> &[ModelStanceRequest] {
        self.models.as_deref().unwrap_or_default()
    }

    /// Structural validation, run before any backend is contacted.
    ///
    /// Step 1 must name at least one pair and no (model, stance) pair may
    /// appear twice. Later steps are not checked beyond the step number.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.step_number == 0 {
            return Err(DomainError::InvalidStep(self.step_number));
        }

        if !self.is_initial_step() {
            return Ok(());
        }

        let models = match self.models.as_deref() {
            Some(models) if !models.is_empty() => models,
            _ => return Err(DomainError::MissingModels),
        };

        let mut seen: HashSet<(&str, &Stance)> = HashSet::with_capacity(models.len());
        for entry in models {
            if entry.model.trim().is_empty() {
                return Err(DomainError::InvalidModel(
                    "model name cannot be empty".to_string(),
                ));
            }
            if !seen.insert((entry.model.as_str(), &entry.stance)) {
                return Err(DomainError::DuplicateModelStance {
                    model: entry.model.clone(),
                    stance: entry.stance.to_string(),
                });
            }
        }

        Ok(())
    }
}
