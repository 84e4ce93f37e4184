//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `FITRANK_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CANDIDATE_TIMEOUT_SECS, DEFAULT_EMBEDDING_CACHE_CAPACITY, DEFAULT_MAX_CONCURRENCY,
};
use crate::embedding::SentenceConfig;

/// Files a model directory must contain.
pub const REQUIRED_MODEL_FILES: [&str; 2] = ["config.json", "model.safetensors"];

/// Tokenizer file name expected inside the model directory.
pub const DEFAULT_TOKENIZER_FILE: &str = "tokenizer.json";

/// Ranking configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `FITRANK_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Sentence encoder directory (BERT + tokenizer). `None` selects the stub embedder.
    pub model_path: Option<PathBuf>,

    /// Tokenizer override. Default: `tokenizer.json` inside `model_path`.
    pub tokenizer_path: Option<PathBuf>,

    /// Upper bound on one candidate evaluation. Default: 60 s.
    pub candidate_timeout: Duration,

    /// Candidates evaluated at once. Default: `1`.
    pub max_concurrency: usize,

    /// Cached embeddings. `0` disables the cache. Default: `256`.
    pub embedding_cache_capacity: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: None,
            tokenizer_path: None,
            candidate_timeout: Duration::from_secs(DEFAULT_CANDIDATE_TIMEOUT_SECS),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            embedding_cache_capacity: DEFAULT_EMBEDDING_CACHE_CAPACITY,
        }
    }
}

impl Config {
    const ENV_MODEL_PATH: &'static str = SentenceConfig::ENV_MODEL_PATH;
    const ENV_TOKENIZER_PATH: &'static str = SentenceConfig::ENV_TOKENIZER_PATH;
    const ENV_CANDIDATE_TIMEOUT_SECS: &'static str = "FITRANK_CANDIDATE_TIMEOUT_SECS";
    const ENV_MAX_CONCURRENCY: &'static str = "FITRANK_MAX_CONCURRENCY";
    const ENV_EMBEDDING_CACHE_CAPACITY: &'static str = "FITRANK_EMBEDDING_CACHE_CAPACITY";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let model_path = Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH);
        let tokenizer_path = Self::parse_optional_path_from_env(Self::ENV_TOKENIZER_PATH);
        let timeout_secs = Self::parse_number_from_env(
            Self::ENV_CANDIDATE_TIMEOUT_SECS,
            defaults.candidate_timeout.as_secs(),
        )?;
        let max_concurrency =
            Self::parse_number_from_env(Self::ENV_MAX_CONCURRENCY, defaults.max_concurrency)?;
        let embedding_cache_capacity = Self::parse_number_from_env(
            Self::ENV_EMBEDDING_CACHE_CAPACITY,
            defaults.embedding_cache_capacity,
        )?;

        Ok(Self {
            model_path,
            tokenizer_path,
            candidate_timeout: Duration::from_secs(timeout_secs),
            max_concurrency,
            embedding_cache_capacity,
        })
    }

    /// Validates paths and basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.candidate_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_CANDIDATE_TIMEOUT_SECS,
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.max_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_MAX_CONCURRENCY,
                reason: "must be at least 1".to_string(),
            });
        }

        if let Some(ref dir) = self.model_path {
            if !dir.exists() {
                return Err(ConfigError::PathNotFound { path: dir.clone() });
            }
            if !dir.is_dir() {
                return Err(ConfigError::NotADirectory { path: dir.clone() });
            }
            for file in REQUIRED_MODEL_FILES {
                let path = dir.join(file);
                if !path.is_file() {
                    return Err(ConfigError::MissingModelFile { path });
                }
            }
        }

        match (&self.tokenizer_path, &self.model_path) {
            (Some(path), _) => {
                if !path.exists() {
                    return Err(ConfigError::PathNotFound { path: path.clone() });
                }
                if !path.is_file() {
                    return Err(ConfigError::NotAFile { path: path.clone() });
                }
            }
            (None, Some(dir)) => {
                let path = dir.join(DEFAULT_TOKENIZER_FILE);
                if !path.is_file() {
                    return Err(ConfigError::MissingModelFile { path });
                }
            }
            (None, None) => {}
        }

        Ok(())
    }

    /// Returns `true` if no model is configured and the stub embedder will be used.
    pub fn uses_stub(&self) -> bool {
        self.model_path.is_none()
    }

    /// Embedder configuration for these settings.
    pub fn sentence_config(&self) -> SentenceConfig {
        let Some(ref dir) = self.model_path else {
            return SentenceConfig::stub();
        };

        let mut config = SentenceConfig::new(dir);
        if let Some(ref tokenizer_path) = self.tokenizer_path {
            config.tokenizer_path = tokenizer_path.clone();
        }
        config
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_number_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr<Err = std::num::ParseIntError>,
    {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::InvalidNumber {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }
}
