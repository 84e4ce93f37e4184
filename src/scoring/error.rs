use std::time::Duration;

use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("scoring computation failed: {reason}")]
    ComputationFailed { reason: String },

    #[error("evaluation timed out after {after:?}")]
    TimedOut { after: Duration },

    #[error("evaluation task aborted: {reason}")]
    Aborted { reason: String },
}
