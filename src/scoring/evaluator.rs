use tracing::{debug, warn};

use super::error::ScoringError;
use super::similarity::similarity_score;
use super::types::ScoreRecord;
use crate::constants::validate_embedding_dim;
use crate::embedding::{Embedding, EmbeddingProvider};
use crate::keywords::{KeywordSet, compare, extract_keywords};

#[derive(Debug, Clone)]
enum QueryEmbedding {
    Insufficient,
    Ready(Embedding),
    Failed(String),
}

/// A query whose keywords and embedding are computed once for a whole batch.
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    text: String,
    keywords: KeywordSet,
    embedding: QueryEmbedding,
}

impl PreparedQuery {
    /// A query that could not be prepared; every candidate scored against it fails.
    pub(crate) fn failed(text: &str, reason: String) -> Self {
        Self {
            text: text.to_string(),
            keywords: extract_keywords(text),
            embedding: QueryEmbedding::Failed(reason),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    /// `false` if the query was blank or could not be embedded.
    pub fn is_usable(&self) -> bool {
        matches!(self.embedding, QueryEmbedding::Ready(_))
    }
}

/// Scores one candidate against a query: embedding similarity plus keyword evidence.
///
/// Every outcome is a [`ScoreRecord`]; empty input and computation failures become
/// degenerate zero-score records instead of errors.
#[derive(Debug, Clone)]
pub struct CandidateEvaluator<P> {
    provider: P,
}

impl<P: EmbeddingProvider> CandidateEvaluator<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Extracts keywords and embeds the query.
    pub fn prepare(&self, query: &str) -> PreparedQuery {
        let keywords = extract_keywords(query);

        let embedding = if is_blank(query) {
            QueryEmbedding::Insufficient
        } else {
            match self.embed_checked(query) {
                Ok(embedding) => QueryEmbedding::Ready(embedding),
                Err(e) => {
                    warn!(error = %e, "Failed to embed query");
                    QueryEmbedding::Failed(e.to_string())
                }
            }
        };

        PreparedQuery {
            text: query.to_string(),
            keywords,
            embedding,
        }
    }

    /// Evaluates a single (query, candidate) pair.
    pub fn evaluate(&self, query: &str, candidate: &str) -> ScoreRecord {
        let prepared = self.prepare(query);
        self.evaluate_prepared(&prepared, candidate)
    }

    /// Evaluates a candidate against an already prepared query.
    pub fn evaluate_prepared(&self, query: &PreparedQuery, candidate: &str) -> ScoreRecord {
        if is_blank(candidate) {
            return ScoreRecord::insufficient_text();
        }

        let query_embedding = match &query.embedding {
            QueryEmbedding::Insufficient => return ScoreRecord::insufficient_text(),
            QueryEmbedding::Failed(reason) => {
                return ScoreRecord::failed(format!("query embedding failed: {reason}"));
            }
            QueryEmbedding::Ready(embedding) => embedding,
        };

        match self.score(query, query_embedding, candidate) {
            Ok(record) => {
                debug!(
                    score = record.score.value(),
                    matched = record.matched_total,
                    missing = record.missing_total,
                    "Candidate scored"
                );
                record
            }
            Err(e) => {
                warn!(error = %e, "Candidate scoring failed");
                ScoreRecord::failed(e.to_string())
            }
        }
    }

    fn score(
        &self,
        query: &PreparedQuery,
        query_embedding: &Embedding,
        candidate: &str,
    ) -> Result<ScoreRecord, ScoringError> {
        let candidate_embedding = self.embed_checked(candidate)?;
        let score = similarity_score(query_embedding, &candidate_embedding)?;
        let comparison = compare(&query.keywords, &extract_keywords(candidate));
        Ok(ScoreRecord::computed(score, comparison))
    }

    /// Embeds `text` and rejects malformed provider output.
    fn embed_checked(&self, text: &str) -> Result<Embedding, ScoringError> {
        let embedding = self.provider.embed(text)?;

        validate_embedding_dim(embedding.dim(), self.provider.embedding_dim()).map_err(|e| {
            ScoringError::ComputationFailed {
                reason: format!("provider returned a malformed embedding: {e}"),
            }
        })?;

        if !embedding.is_finite() {
            return Err(ScoringError::ComputationFailed {
                reason: "provider returned non-finite values".to_string(),
            });
        }

        Ok(embedding)
    }
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
