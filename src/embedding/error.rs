use std::path::PathBuf;
use thiserror::Error;

/// Failures of loading or running a sentence embedding model.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Model directory or one of its files is missing.
    #[error("sentence model not found at {path}")]
    ModelNotFound { path: PathBuf },

    /// Weights or model config could not be read.
    #[error("failed to load sentence model: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("tokenizer error: {reason}")]
    TokenizationFailed { reason: String },

    /// Forward pass or tensor operation failed.
    #[error("embedding inference failed: {reason}")]
    InferenceFailed { reason: String },

    /// The model ran but its vector is unusable (wrong length, NaN/inf).
    #[error("malformed embedding output: {reason}")]
    MalformedOutput { reason: String },

    #[error("invalid embedder configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<candle_core::Error> for EmbeddingError {
    fn from(err: candle_core::Error) -> Self {
        Self::InferenceFailed {
            reason: err.to_string(),
        }
    }
}
