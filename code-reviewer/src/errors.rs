//! Crate-wide error hierarchy for code-reviewer.

use ai_llm_service::AiLlmError;
use repo_intake::IntakeError;
use thiserror::Error;

use crate::modes::ReviewMode;

/// Convenient alias for orchestrator results.
pub type ReviewResult<T> = Result<T, ReviewError>;

/// Failures of a single orchestrator call.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Code was empty or whitespace only; nothing was sent.
    #[error("cannot review empty code")]
    EmptyInput,

    /// The mode cannot be applied to a whole repository; nothing was sent.
    #[error("review mode `{0}` is not available for repository reviews")]
    ModeNotSupportedForRepository(ReviewMode),

    #[error("unknown review mode `{0}`")]
    UnknownMode(String),

    /// The text-generation service failed.
    #[error("failed to get review: {0}")]
    Generation(#[from] AiLlmError),
}

/// Failures of an end-to-end workflow (intake + review).
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error(transparent)]
    Review(#[from] ReviewError),
}
