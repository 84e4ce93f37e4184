//! Cross-cutting, shared constants.
//!
//! # Dimension Invariants
//!
//! Embeddings are only comparable when produced by the same provider configuration.
//! [`DEFAULT_EMBEDDING_DIM`] matches the MiniLM sentence encoder and is the default for
//! stub vectors too, so stub and model embeddings have the same shape. Use
//! [`validate_embedding_dim`] at module boundaries to catch mismatches early.

/// Output dimension of the MiniLM-L6 sentence encoder.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Max tokens fed to the sentence encoder (longer inputs are truncated).
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Minimum length of an alphabetic run to count as a keyword.
pub const MIN_KEYWORD_LEN: usize = 3;

/// Max matched/missing keywords kept for display (narrative counts are not capped).
pub const MAX_DISPLAY_KEYWORDS: usize = 8;

/// Upper bound of the relevance score.
pub const MAX_SCORE: u8 = 100;

/// Default per-candidate evaluation timeout for async ranking.
pub const DEFAULT_CANDIDATE_TIMEOUT_SECS: u64 = 60;

/// Default number of candidate evaluations in flight for async ranking.
pub const DEFAULT_MAX_CONCURRENCY: usize = 1;

/// Default capacity of the in-memory embedding cache (0 disables it).
pub const DEFAULT_EMBEDDING_CACHE_CAPACITY: u64 = 256;

/// Error returned when dimension validation fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    ZeroDimension,
    /// Runtime dimension does not match expected dimension.
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for DimValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "embedding dimension cannot be zero"),
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "dimension mismatch: expected {}, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for DimValidationError {}

/// Validates that a runtime embedding dimension matches the expected dimension.
///
/// # Example
///
/// ```
/// use fitrank::constants::{validate_embedding_dim, DEFAULT_EMBEDDING_DIM};
///
/// validate_embedding_dim(384, DEFAULT_EMBEDDING_DIM).unwrap();
/// assert!(validate_embedding_dim(768, DEFAULT_EMBEDDING_DIM).is_err());
/// ```
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if expected == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
