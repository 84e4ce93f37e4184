use std::sync::Arc;

use super::error::EmbeddingError;

/// Immutable dense embedding vector.
///
/// Cloning is cheap (shared buffer). Two embeddings are only comparable when they come
/// from the same provider configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    values: Arc<[f32]>,
}

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self {
            values: values.into(),
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn dim(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if every component is finite (no NaN/inf).
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(values: Vec<f32>) -> Self {
        Self::new(values)
    }
}

/// Maps text to a fixed-length vector.
///
/// Implementations must be deterministic for a fixed model and must never return a
/// partial vector: either a full `embedding_dim()` vector or an error.
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds a single, non-empty text.
    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError>;

    /// Dimension of every vector this provider produces.
    fn embedding_dim(&self) -> usize;

    /// Identifies the model/configuration (embeddings from different ids don't mix).
    fn model_id(&self) -> &str;
}

impl<P: EmbeddingProvider + ?Sized> EmbeddingProvider for Arc<P> {
    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        (**self).embed(text)
    }

    fn embedding_dim(&self) -> usize {
        (**self).embedding_dim()
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }
}
