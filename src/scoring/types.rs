use serde::Serialize;

use crate::constants::MAX_SCORE;
use crate::keywords::KeywordComparison;

/// Note attached to matched terms when the text was empty.
pub const INSUFFICIENT_MATCHED_NOTE: &str = "Insufficient text in resume or job description.";
/// Note attached to missing terms when the text was empty.
pub const INSUFFICIENT_MISSING_NOTE: &str = "Provide a full JD and a readable resume.";
/// Summary of an insufficient-text record.
pub const INSUFFICIENT_SUMMARY: &str = "Could not compute similarity because input text was empty.";
/// Note attached to matched terms when scoring failed.
pub const FAILED_MATCHED_NOTE: &str = "Error while computing embeddings.";

/// Relevance score in `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    pub const ZERO: Score = Score(0);
    pub const MAX: Score = Score(MAX_SCORE);

    /// Returns `None` above 100.
    pub fn new(value: u8) -> Option<Self> {
        (value <= MAX_SCORE).then_some(Self(value))
    }

    /// Maps a cosine similarity to a score: clamp to `[0, 1]`, scale by 100, round.
    ///
    /// NaN maps to zero.
    pub fn from_similarity(similarity: f32) -> Self {
        if similarity.is_nan() {
            return Self::ZERO;
        }
        let scaled = (similarity.clamp(0.0, 1.0) * f32::from(MAX_SCORE)).round();
        Self(scaled as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Matched or missing keywords of a record.
///
/// `Terms` is always explicit, even when empty; `NotComputed` marks degenerate records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordEvidence {
    Terms(Vec<String>),
    NotComputed { note: String },
}

impl KeywordEvidence {
    pub fn not_computed(note: impl Into<String>) -> Self {
        Self::NotComputed { note: note.into() }
    }

    /// The computed terms, or `None` for degenerate records.
    pub fn terms(&self) -> Option<&[String]> {
        match self {
            Self::Terms(terms) => Some(terms),
            Self::NotComputed { .. } => None,
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Self::Terms(_))
    }

    /// Explanatory note of a degenerate record.
    pub fn note(&self) -> Option<&str> {
        match self {
            Self::Terms(_) => None,
            Self::NotComputed { note } => Some(note),
        }
    }
}

/// How a [`ScoreRecord`] was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordStatus {
    /// Full embedding + keyword computation.
    Computed,
    /// Query or candidate text was empty/whitespace.
    InsufficientText,
    /// Embedding or similarity failed; `reason` describes the error.
    ComputationFailed { reason: String },
}

/// Result of evaluating one candidate against the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreRecord {
    pub score: Score,
    /// Up to 8 matched query keywords, alphabetical.
    pub matched: KeywordEvidence,
    /// Up to 8 missing query keywords, alphabetical.
    pub missing: KeywordEvidence,
    /// Full number of matched keywords (not capped).
    pub matched_total: usize,
    /// Full number of missing keywords (not capped).
    pub missing_total: usize,
    pub summary: String,
    pub status: RecordStatus,
}

impl ScoreRecord {
    /// Builds a fully computed record.
    pub fn computed(score: Score, comparison: KeywordComparison) -> Self {
        let summary = format!(
            "The resume matches the job description with a semantic similarity score of {}/{}. \
             It shares {} overlapping keywords with the job description and is missing {} of its keywords.",
            score, MAX_SCORE, comparison.matched_total, comparison.missing_total
        );

        Self {
            score,
            matched: KeywordEvidence::Terms(comparison.matched),
            missing: KeywordEvidence::Terms(comparison.missing),
            matched_total: comparison.matched_total,
            missing_total: comparison.missing_total,
            summary,
            status: RecordStatus::Computed,
        }
    }

    /// Degenerate record for empty or whitespace-only input.
    pub fn insufficient_text() -> Self {
        Self {
            score: Score::ZERO,
            matched: KeywordEvidence::not_computed(INSUFFICIENT_MATCHED_NOTE),
            missing: KeywordEvidence::not_computed(INSUFFICIENT_MISSING_NOTE),
            matched_total: 0,
            missing_total: 0,
            summary: INSUFFICIENT_SUMMARY.to_string(),
            status: RecordStatus::InsufficientText,
        }
    }

    /// Degenerate record for a failed computation.
    pub fn failed(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            score: Score::ZERO,
            matched: KeywordEvidence::not_computed(FAILED_MATCHED_NOTE),
            missing: KeywordEvidence::not_computed(reason.clone()),
            matched_total: 0,
            missing_total: 0,
            summary: format!("The embedding model failed to compute a score: {reason}"),
            status: RecordStatus::ComputationFailed { reason },
        }
    }

    /// Returns `true` for short-circuit and failure records.
    pub fn is_degenerate(&self) -> bool {
        !matches!(self.status, RecordStatus::Computed)
    }

    /// Returns `true` if the computation failed (as opposed to a low score).
    pub fn is_failed(&self) -> bool {
        matches!(self.status, RecordStatus::ComputationFailed { .. })
    }
}
