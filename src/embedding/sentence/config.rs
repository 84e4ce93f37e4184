use std::path::PathBuf;

use crate::embedding::error::EmbeddingError;

/// Default sentence embedding dimension (MiniLM-L6).
pub const SENTENCE_EMBEDDING_DIM: usize = crate::constants::DEFAULT_EMBEDDING_DIM;

/// Default max sequence length for the sentence encoder.
pub const SENTENCE_MAX_SEQ_LEN: usize = crate::constants::DEFAULT_MAX_SEQ_LEN;

/// Model id reported by the stub backend.
pub const STUB_MODEL_ID: &str = "stub-bag-of-words";

#[derive(Debug, Clone)]
/// Configuration for [`SentenceEmbedder`](super::SentenceEmbedder).
pub struct SentenceConfig {
    /// Directory holding `config.json` and `model.safetensors`.
    pub model_dir: PathBuf,
    /// Path to `tokenizer.json`.
    pub tokenizer_path: PathBuf,
    /// Max tokens to consider.
    pub max_seq_len: usize,
    /// Output embedding dimension.
    pub embedding_dim: usize,
    /// If true, run in deterministic stub mode (no model files required).
    pub testing_stub: bool,
}

impl Default for SentenceConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::new(),
            tokenizer_path: PathBuf::new(),
            max_seq_len: SENTENCE_MAX_SEQ_LEN,
            embedding_dim: SENTENCE_EMBEDDING_DIM,
            testing_stub: false,
        }
    }
}

impl SentenceConfig {
    /// Env var used to locate the model directory.
    pub const ENV_MODEL_PATH: &'static str = "FITRANK_MODEL_PATH";
    /// Env var used to locate the tokenizer file.
    pub const ENV_TOKENIZER_PATH: &'static str = "FITRANK_TOKENIZER_PATH";

    /// Loads config from environment variables.
    ///
    /// Without `FITRANK_MODEL_PATH` the config falls back to stub mode.
    pub fn from_env() -> Self {
        let model_dir = std::env::var(Self::ENV_MODEL_PATH)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let Some(model_dir) = model_dir else {
            return Self::stub();
        };

        let mut config = Self::new(model_dir);
        if let Some(tokenizer_path) = std::env::var(Self::ENV_TOKENIZER_PATH)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
        {
            config.tokenizer_path = PathBuf::from(tokenizer_path);
        }
        config
    }

    /// Creates a config for a model directory, with `tokenizer.json` inside it.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        let model_dir = model_dir.into();
        let tokenizer_path = model_dir.join("tokenizer.json");

        Self {
            model_dir,
            tokenizer_path,
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files; produces deterministic embeddings).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    /// Validates required fields for non-stub mode.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim must be greater than zero".to_string(),
            });
        }

        if self.testing_stub {
            return Ok(());
        }

        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be greater than zero".to_string(),
            });
        }

        if self.model_dir.as_os_str().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_dir is required (stubbing is disabled)".to_string(),
            });
        }

        if !self.model_dir.is_dir() {
            return Err(EmbeddingError::ModelNotFound {
                path: self.model_dir.clone(),
            });
        }

        Ok(())
    }

    /// Returns `true` if `config.json` and `model.safetensors` exist.
    pub fn model_available(&self) -> bool {
        !self.model_dir.as_os_str().is_empty()
            && self.model_dir.join("config.json").is_file()
            && self.model_dir.join("model.safetensors").is_file()
    }

    /// Returns `true` if the tokenizer path exists.
    pub fn tokenizer_available(&self) -> bool {
        !self.tokenizer_path.as_os_str().is_empty() && self.tokenizer_path.is_file()
    }
}
