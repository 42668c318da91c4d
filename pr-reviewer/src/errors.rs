//! Crate-wide error hierarchy for pr-reviewer.
//!
//! Only upstream failures are errors; refused and ignored deliveries are
//! reported through [`crate::pipeline::DeliveryOutcome`].

use ai_llm_service::AiLlmError;
use git_context_engine::GitContextEngineError;
use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type ReviewResult<T> = Result<T, ReviewError>;

#[derive(Debug, Error)]
pub enum ReviewError {
    /// GitHub request failed (diff download or comment post).
    #[error("github request failed: {0}")]
    GitHub(#[from] GitContextEngineError),

    /// Chat-completion request failed.
    #[error("llm request failed: {0}")]
    Llm(#[from] AiLlmError),
}
