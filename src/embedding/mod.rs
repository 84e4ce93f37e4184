//! Embedding provider and model utilities.
//!
//! - [`provider`] defines the [`EmbeddingProvider`] seam every scorer depends on.
//! - [`sentence`] is the MiniLM-style sentence encoder (with a stub backend).
//! - [`cache`] wraps any provider with an exact-text cache.

/// BERT sentence encoder with mean pooling.
pub mod bert;
/// Exact-text embedding cache.
pub mod cache;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
/// Provider trait and embedding vector type.
pub mod provider;
/// Sentence embedder.
pub mod sentence;
mod shared;
/// Tokenizer loading and vector helpers.
pub mod utils;

pub use cache::CachedEmbedder;
pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbeddingProvider;
pub use provider::{Embedding, EmbeddingProvider};
pub use sentence::{
    SENTENCE_EMBEDDING_DIM, SENTENCE_MAX_SEQ_LEN, STUB_MODEL_ID, SentenceConfig, SentenceEmbedder,
};
pub use shared::shared_embedder;
