use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use crate::scoring::{Score, ScoreRecord};

/// A candidate document: identifier plus already-extracted plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Candidate name (unique within a batch by convention, not enforced).
    pub id: String,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// `false` if extraction produced no usable text.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// One ranked candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub id: String,
    /// Index of the document in the input sequence.
    pub position: usize,
    pub record: ScoreRecord,
}

/// Why a document was left out of the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Extraction failed or produced only whitespace.
    EmptyText,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::EmptyText => write!(f, "no extractable text"),
        }
    }
}

/// A document excluded from the ranking (reported, not silently dropped).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedDocument {
    pub id: String,
    pub position: usize,
    pub reason: SkipReason,
}

/// Aggregates over ranked entries. `max`/`mean` are `None` when nothing was ranked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RankingStats {
    pub count: usize,
    pub max: Option<Score>,
    /// Mean score rounded to the nearest integer (halves round up).
    pub mean: Option<Score>,
}

impl RankingStats {
    pub fn from_scores(scores: &[Score]) -> Self {
        let count = scores.len();
        let max = scores.iter().copied().max();
        let mean = (count > 0).then(|| {
            let sum: usize = scores.iter().map(|s| usize::from(s.value())).sum();
            let rounded = (2 * sum + count) / (2 * count);
            // Mean of values in 0..=100 stays in 0..=100.
            Score::new(rounded as u8).unwrap_or(Score::MAX)
        });

        Self { count, max, mean }
    }
}

/// Overall outcome of a ranking run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RankingStatus {
    /// Every document was processed and at least one was ranked.
    Complete,
    /// Every document was processed but none had usable text.
    NoUsableInput,
    /// Stopped early; `processed` documents (ranked or skipped) were handled.
    Stopped { processed: usize },
}

/// Batch output: ranked entries (score descending, ties in input order), skipped
/// documents and aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingResult {
    pub entries: Vec<RankedEntry>,
    pub skipped: Vec<SkippedDocument>,
    pub stats: RankingStats,
    pub status: RankingStatus,
}

impl RankingResult {
    /// Entry for `id` (first match).
    pub fn get(&self, id: &str) -> Option<&RankedEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Ranked ids in rank order.
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }

    /// Number of ranked entries whose computation failed.
    pub fn failed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.record.is_failed()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Cooperative stop flag checked between candidates.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
