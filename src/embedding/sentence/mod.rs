//! Sentence embedder (BERT + mean pooling, MiniLM-style).
//!
//! Loading is the expensive one-time step: weights are memory-mapped and the tokenizer
//! parsed once, then the instance is reused for every scoring call. Use
//! [`SentenceConfig::stub`] for tests and examples without model files.

/// Sentence embedder configuration.
pub mod config;

#[cfg(test)]
mod tests;

pub use config::{SENTENCE_EMBEDDING_DIM, SENTENCE_MAX_SEQ_LEN, STUB_MODEL_ID, SentenceConfig};

use std::sync::Arc;

use candle_core::{Device, Tensor};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::embedding::bert::BertSentenceEncoder;
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::provider::{Embedding, EmbeddingProvider};
use crate::embedding::utils::{bag_of_words_vector, load_tokenizer, normalize};

enum EmbedderBackend {
    Model {
        encoder: Arc<Mutex<BertSentenceEncoder>>,
        tokenizer: Arc<tokenizers::Tokenizer>,
        device: Device,
    },
    Stub {
        device: Device,
    },
}

/// Embedding generator for candidate/query texts (supports stub mode).
pub struct SentenceEmbedder {
    backend: EmbedderBackend,
    config: SentenceConfig,
    model_id: String,
}

impl std::fmt::Debug for SentenceEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EmbedderBackend::Stub { device } => format!("Stub({:?})", device),
                },
            )
            .field("model_id", &self.model_id)
            .field("embedding_dim", &self.config.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl SentenceEmbedder {
    /// Loads the embedder from a config (stub mode is supported).
    pub fn load(config: SentenceConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let device = select_device();
        debug!(?device, "Selected compute device for sentence encoder");

        if config.testing_stub {
            warn!("Sentence embedder running in STUB mode (lexical vectors, testing only)");
            return Ok(Self {
                backend: EmbedderBackend::Stub { device },
                config,
                model_id: STUB_MODEL_ID.to_string(),
            });
        }

        if !config.model_available() || !config.tokenizer_available() {
            return Err(EmbeddingError::ModelNotFound {
                path: config.model_dir.clone(),
            });
        }

        let (encoder, tokenizer) = Self::load_model(&config, &device)?;
        let model_id = config
            .model_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| config.model_dir.display().to_string());

        info!(
            model_dir = %config.model_dir.display(),
            model_id = %model_id,
            embedding_dim = config.embedding_dim,
            max_seq_len = config.max_seq_len,
            "Sentence encoder loaded"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                encoder: Arc::new(Mutex::new(encoder)),
                tokenizer: Arc::new(tokenizer),
                device,
            },
            config,
            model_id,
        })
    }

    /// Loads a stub embedder. Never touches the filesystem.
    pub fn stub() -> Result<Self, EmbeddingError> {
        Self::load(SentenceConfig::stub())
    }

    fn load_model(
        config: &SentenceConfig,
        device: &Device,
    ) -> Result<(BertSentenceEncoder, tokenizers::Tokenizer), EmbeddingError> {
        let tokenizer = load_tokenizer(&config.tokenizer_path, config.max_seq_len)?;

        let encoder = BertSentenceEncoder::load(&config.model_dir, device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT encoder: {}", e),
            }
        })?;

        if config.embedding_dim != encoder.hidden_size() {
            return Err(EmbeddingError::InvalidConfig {
                reason: format!(
                    "embedding_dim ({}) does not match model hidden_size ({})",
                    config.embedding_dim,
                    encoder.hidden_size()
                ),
            });
        }

        Ok((encoder, tokenizer))
    }

    fn embed_with_model(
        &self,
        text: &str,
        encoder: &Mutex<BertSentenceEncoder>,
        tokenizer: &tokenizers::Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        let len = encoding.get_ids().len().min(self.config.max_seq_len);
        if len == 0 {
            return Err(EmbeddingError::TokenizationFailed {
                reason: "no tokens produced".to_string(),
            });
        }

        debug!(
            text_len = text.len(),
            token_count = len,
            "Generating embedding (encoder forward pass)"
        );

        let input_ids = Self::row_tensor(&encoding.get_ids()[..len], device)?;
        let type_ids = Self::row_tensor(&encoding.get_type_ids()[..len], device)?;
        let attention_mask = Self::row_tensor(&encoding.get_attention_mask()[..len], device)?;

        // Inference is serialised; the mutex is the single slot for the shared model.
        let pooled = encoder
            .lock()
            .forward(&input_ids, &type_ids, &attention_mask)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Encoder forward pass failed: {}", e),
            })?;

        let values = pooled.squeeze(0)?.to_vec1::<f32>()?;
        Ok(normalize(values))
    }

    fn row_tensor(values: &[u32], device: &Device) -> Result<Tensor, EmbeddingError> {
        Ok(Tensor::new(values, device)?.unsqueeze(0)?)
    }

    fn embed_stub(&self, text: &str) -> Vec<f32> {
        debug!(text_len = text.len(), "Generating stub embedding");
        bag_of_words_vector(text, self.config.embedding_dim)
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub { .. })
    }

    /// Returns `true` if a model is loaded.
    pub fn has_model(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Model { .. })
    }

    /// Returns the embedder configuration.
    pub fn config(&self) -> &SentenceConfig {
        &self.config
    }
}

/// Rejects vectors of the wrong length or with NaN/inf components.
fn check_output(values: Vec<f32>, expected_dim: usize) -> Result<Embedding, EmbeddingError> {
    if values.len() != expected_dim {
        return Err(EmbeddingError::MalformedOutput {
            reason: format!("{} values, expected {}", values.len(), expected_dim),
        });
    }

    let embedding = Embedding::new(values);
    if !embedding.is_finite() {
        return Err(EmbeddingError::MalformedOutput {
            reason: "non-finite values".to_string(),
        });
    }

    Ok(embedding)
}

impl EmbeddingProvider for SentenceEmbedder {
    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let values = match &self.backend {
            EmbedderBackend::Model {
                encoder,
                tokenizer,
                device,
            } => self.embed_with_model(text, encoder, tokenizer, device)?,
            EmbedderBackend::Stub { .. } => self.embed_stub(text),
        };

        check_output(values, self.config.embedding_dim)
    }

    fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
