//! Fitrank library crate (used by the `fitrank` binary and integration tests).
//!
//! Ranks candidate resumes against a job description. Each candidate gets a 0-100
//! semantic similarity score from a sentence embedding model, plus the job description
//! keywords it matches and misses.
//!
//! # Public API Surface
//!
//! ## Ranking
//! - [`BatchRanker`] - Orders documents by score (sync, interruptible and async paths)
//! - [`Document`], [`RankingResult`], [`RankingStats`], [`RankingStatus`], [`StopSignal`]
//!
//! ## Scoring
//! - [`CandidateEvaluator`], [`PreparedQuery`] - Per-candidate evaluation
//! - [`ScoreRecord`], [`Score`], [`KeywordEvidence`], [`RecordStatus`]
//! - [`cosine_similarity`], [`similarity_score`]
//!
//! ## Embedding
//! - [`EmbeddingProvider`] - Injectable text-to-vector seam
//! - [`SentenceEmbedder`], [`SentenceConfig`] - MiniLM-style encoder with a stub backend
//! - [`CachedEmbedder`] - Exact-text cache around any provider
//! - [`shared_embedder`] - Process-wide, load-once embedder
//!
//! ## Keywords
//! - [`extract_keywords`], [`KeywordSet`], [`KeywordComparison`]
//!
//! ## Utilities
//! - [`Config`], [`ConfigError`] - Environment configuration
//! - [`decode_text`], [`read_document`] - Plain-text document loading
//! - [`validate_embedding_dim`] - Dimension validation
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod hashing;
pub mod keywords;
pub mod ranking;
pub mod scoring;
pub mod source;

pub use config::{Config, ConfigError};
pub use constants::{DimValidationError, validate_embedding_dim};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbeddingProvider;
pub use embedding::{
    CachedEmbedder, Embedding, EmbeddingError, EmbeddingProvider, SentenceConfig,
    SentenceEmbedder, shared_embedder,
};
pub use hashing::{hash_text, hash_to_u64};
pub use keywords::{KeywordComparison, KeywordSet, extract_keywords};
pub use ranking::{
    BatchRanker, Document, RankedEntry, RankerOptions, RankingResult, RankingStats,
    RankingStatus, SkipReason, SkippedDocument, StopSignal,
};
pub use scoring::{
    CandidateEvaluator, KeywordEvidence, PreparedQuery, RecordStatus, Score, ScoreRecord,
    ScoringError, cosine_similarity, similarity_score,
};
pub use source::{decode_text, read_document};
