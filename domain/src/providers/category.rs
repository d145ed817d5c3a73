//! Model category used for fallback selection

use serde::{Deserialize, Serialize};

/// What kind of work a model is being picked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelCategory {
    /// Deep analysis, long chains of reasoning
    ExtendedReasoning,
    /// Quick, cheap answers
    FastResponse,
    /// Everything else
    #[default]
    Balanced,
}

impl ModelCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelCategory::ExtendedReasoning => "extended_reasoning",
            ModelCategory::FastResponse => "fast_response",
            ModelCategory::Balanced => "balanced",
        }
    }
}

impl std::fmt::Display for ModelCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ModelCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "extended_reasoning" | "reasoning" => Ok(ModelCategory::ExtendedReasoning),
            "fast_response" | "fast" => Ok(ModelCategory::FastResponse),
            "balanced" => Ok(ModelCategory::Balanced),
            other => Err(format!("Unknown model category: {other}")),
        }
    }
}
