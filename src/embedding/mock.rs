use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::error::EmbeddingError;
use super::provider::{Embedding, EmbeddingProvider};
use super::utils::bag_of_words_vector;

/// Deterministic provider for tests.
///
/// Produces hashed bag-of-words vectors by default. Explicit vectors, injected failures
/// and an artificial delay can be configured per text.
#[derive(Debug)]
pub struct MockEmbeddingProvider {
    dim: usize,
    overrides: HashMap<String, Vec<f32>>,
    fail_markers: Vec<String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl Default for MockEmbeddingProvider {
    fn default() -> Self {
        Self::with_dim(crate::constants::DEFAULT_EMBEDDING_DIM)
    }
}

impl MockEmbeddingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dim(dim: usize) -> Self {
        Self {
            dim,
            overrides: HashMap::new(),
            fail_markers: Vec::new(),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Returns `vector` verbatim for exactly `text` (length is not checked).
    pub fn with_vector(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.overrides.insert(text.to_string(), vector);
        self
    }

    /// Fails with `InferenceFailed` for any text containing `marker`.
    pub fn failing_on(mut self, marker: &str) -> Self {
        self.fail_markers.push(marker.to_string());
        self
    }

    /// Sleeps for `delay` on every call (for timeout tests).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `embed` calls so far, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EmbeddingProvider for MockEmbeddingProvider {
    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        if let Some(marker) = self.fail_markers.iter().find(|m| text.contains(m.as_str())) {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("injected failure for marker '{marker}'"),
            });
        }

        if let Some(vector) = self.overrides.get(text) {
            return Ok(Embedding::new(vector.clone()));
        }

        Ok(Embedding::new(bag_of_words_vector(text, self.dim)))
    }

    fn embedding_dim(&self) -> usize {
        self.dim
    }

    fn model_id(&self) -> &str {
        "mock"
    }
}
