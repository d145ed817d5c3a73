//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These are structural problems with a request. They are raised before any
/// backend is contacted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Step 1 requires 'models' field to specify which models to consult")]
    MissingModels,

    #[error(
        "Duplicate model + stance combination found: {model}:{stance}. \
         Use the same model with different stances instead."
    )]
    DuplicateModelStance { model: String, stance: String },

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Invalid step: step_number must be >= 1 (got {0})")]
    InvalidStep(u32),
}

impl DomainError {
    /// Check if this error was caused by a duplicated (model, stance) pair
    pub fn is_duplicate(&self) -> bool {
        matches!(self, DomainError::DuplicateModelStance { .. })
    }
}
