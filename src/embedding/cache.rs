//! In-memory exact-text embedding cache.
//!
//! Keys are BLAKE3 hashes of the full text, values are shared [`Embedding`]s. Errors are
//! never cached, so a transient failure is retried on the next call.

use moka::sync::Cache;
use tracing::debug;

use super::error::EmbeddingError;
use super::provider::{Embedding, EmbeddingProvider};
use crate::hashing::hash_text;

/// Wraps a provider with a bounded cache of recent embeddings.
pub struct CachedEmbedder<P> {
    inner: P,
    entries: Cache<[u8; 32], Embedding>,
}

impl<P: EmbeddingProvider> CachedEmbedder<P> {
    /// Creates a cache holding at most `capacity` embeddings.
    pub fn new(inner: P, capacity: u64) -> Self {
        Self {
            inner,
            entries: Cache::new(capacity),
        }
    }

    /// Returns the wrapped provider.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Returns `true` if an embedding for `text` is cached.
    pub fn contains(&self, text: &str) -> bool {
        self.entries.contains_key(&hash_text(text))
    }

    /// Drops all cached embeddings.
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}

impl<P: EmbeddingProvider> EmbeddingProvider for CachedEmbedder<P> {
    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let key = hash_text(text);
        if let Some(hit) = self.entries.get(&key) {
            debug!(text_len = text.len(), "Embedding cache hit");
            return Ok(hit);
        }

        let embedding = self.inner.embed(text)?;
        self.entries.insert(key, embedding.clone());
        Ok(embedding)
    }

    fn embedding_dim(&self) -> usize {
        self.inner.embedding_dim()
    }

    fn model_id(&self) -> &str {
        self.inner.model_id()
    }
}

impl<P> std::fmt::Debug for CachedEmbedder<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedEmbedder")
            .field("entries", &self.entries.entry_count())
            .finish()
    }
}
