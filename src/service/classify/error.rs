//! Error types for ticket classification
//!
//! These errors are diagnostic only. Every variant resolves to the
//! fallback suggestion; none is ever surfaced to a caller.

use thiserror::Error;

use crate::service::llm::LlmError;

/// Reason a classification attempt fell back to the default suggestion
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("no API credential configured")]
    MissingCredential,

    #[error("completion API call failed: {0}")]
    Api(#[from] LlmError),

    #[error("reply was not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("reply outside allowed values: {0}")]
    Validation(String),
}
