use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use futures_util::stream;
use tracing::{debug, info, warn};

use super::types::{
    Document, RankedEntry, RankingResult, RankingStats, RankingStatus, SkipReason,
    SkippedDocument, StopSignal,
};
use crate::config::Config;
use crate::constants::{DEFAULT_CANDIDATE_TIMEOUT_SECS, DEFAULT_MAX_CONCURRENCY};
use crate::embedding::EmbeddingProvider;
use crate::scoring::{CandidateEvaluator, PreparedQuery, ScoreRecord, ScoringError};

/// Knobs for [`BatchRanker::rank_async`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankerOptions {
    /// Upper bound on one candidate evaluation (async path only).
    pub candidate_timeout: Duration,
    /// Evaluations in flight at once (async path only). Values below 1 act as 1.
    pub max_concurrency: usize,
}

impl Default for RankerOptions {
    fn default() -> Self {
        Self {
            candidate_timeout: Duration::from_secs(DEFAULT_CANDIDATE_TIMEOUT_SECS),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl From<&Config> for RankerOptions {
    fn from(config: &Config) -> Self {
        Self {
            candidate_timeout: config.candidate_timeout,
            max_concurrency: config.max_concurrency,
        }
    }
}

/// What happened to one input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateOutcome {
    Scored {
        position: usize,
        id: String,
        record: ScoreRecord,
    },
    Skipped(SkippedDocument),
}

impl CandidateOutcome {
    fn skipped(position: usize, id: String) -> Self {
        warn!(
            candidate = %id,
            position,
            "Skipping candidate: no extractable text"
        );
        Self::Skipped(SkippedDocument {
            id,
            position,
            reason: SkipReason::EmptyText,
        })
    }
}

/// Reduces per-candidate outcomes (in input order) into a ranking.
///
/// Entries are sorted by score descending with a stable sort, so equal scores keep their
/// input order. `stopped` marks a run that ended early.
pub fn assemble(outcomes: Vec<CandidateOutcome>, stopped: bool) -> RankingResult {
    let processed = outcomes.len();
    let mut scored = Vec::with_capacity(processed);
    let mut skipped = Vec::new();

    for outcome in outcomes {
        match outcome {
            CandidateOutcome::Scored {
                position,
                id,
                record,
            } => scored.push((position, id, record)),
            CandidateOutcome::Skipped(doc) => skipped.push(doc),
        }
    }

    scored.sort_by(|a, b| b.2.score.cmp(&a.2.score));

    let entries: Vec<RankedEntry> = scored
        .into_iter()
        .enumerate()
        .map(|(idx, (position, id, record))| RankedEntry {
            rank: idx + 1,
            id,
            position,
            record,
        })
        .collect();

    let scores: Vec<_> = entries.iter().map(|e| e.record.score).collect();
    let stats = RankingStats::from_scores(&scores);

    let status = if stopped {
        RankingStatus::Stopped { processed }
    } else if entries.is_empty() {
        RankingStatus::NoUsableInput
    } else {
        RankingStatus::Complete
    };

    RankingResult {
        entries,
        skipped,
        stats,
        status,
    }
}

/// Ranks candidate documents against one query.
#[derive(Debug, Clone)]
pub struct BatchRanker<P> {
    evaluator: CandidateEvaluator<P>,
    options: RankerOptions,
}

impl<P: EmbeddingProvider> BatchRanker<P> {
    pub fn new(provider: P) -> Self {
        Self::with_options(provider, RankerOptions::default())
    }

    pub fn with_options(provider: P, options: RankerOptions) -> Self {
        Self {
            evaluator: CandidateEvaluator::new(provider),
            options,
        }
    }

    pub fn evaluator(&self) -> &CandidateEvaluator<P> {
        &self.evaluator
    }

    pub fn options(&self) -> &RankerOptions {
        &self.options
    }

    /// Ranks every document, one at a time, in input order.
    pub fn rank(&self, query: &str, documents: &[Document]) -> RankingResult {
        self.rank_until(query, documents, &StopSignal::new())
    }

    /// Like [`rank`](Self::rank), checking `stop` before each document.
    ///
    /// On stop the documents handled so far are ranked and the rest ignored.
    pub fn rank_until(
        &self,
        query: &str,
        documents: &[Document],
        stop: &StopSignal,
    ) -> RankingResult {
        let prepared = self.evaluator.prepare(query);
        let mut outcomes = Vec::with_capacity(documents.len());
        let mut stopped = false;

        for (position, doc) in documents.iter().enumerate() {
            if stop.is_stopped() {
                info!(position, total = documents.len(), "Ranking stopped early");
                stopped = true;
                break;
            }
            outcomes.push(self.process(&prepared, position, doc));
        }

        finish(assemble(outcomes, stopped), documents.len())
    }

    fn process(
        &self,
        prepared: &PreparedQuery,
        position: usize,
        doc: &Document,
    ) -> CandidateOutcome {
        if !doc.has_text() {
            return CandidateOutcome::skipped(position, doc.id.clone());
        }

        debug!(candidate = %doc.id, position, "Evaluating candidate");
        CandidateOutcome::Scored {
            position,
            id: doc.id.clone(),
            record: self.evaluator.evaluate_prepared(prepared, &doc.text),
        }
    }
}

impl<P> BatchRanker<P>
where
    P: EmbeddingProvider + Clone + 'static,
{
    /// Ranks on tokio's blocking pool with a per-candidate timeout.
    ///
    /// Up to `max_concurrency` evaluations run at once; results are still reduced in input
    /// order, so ties rank exactly as in [`rank`](Self::rank). A timed-out or panicked
    /// evaluation becomes a failed record. The timed-out work itself cannot be cancelled
    /// and finishes in the background; its result is discarded.
    pub async fn rank_async(
        &self,
        query: &str,
        documents: Vec<Document>,
        stop: &StopSignal,
    ) -> RankingResult {
        let total = documents.len();
        let prepared = Arc::new(self.prepare_blocking(query).await);
        let timeout = self.options.candidate_timeout;

        let evaluations = stream::iter(documents.into_iter().enumerate()).map(|(position, doc)| {
            let evaluator = self.evaluator.clone();
            let prepared = Arc::clone(&prepared);
            let stop = stop.clone();

            async move {
                if stop.is_stopped() {
                    return None;
                }
                if !doc.has_text() {
                    return Some(CandidateOutcome::skipped(position, doc.id));
                }

                let Document { id, text } = doc;
                debug!(candidate = %id, position, "Evaluating candidate");
                let task = tokio::task::spawn_blocking(move || {
                    evaluator.evaluate_prepared(&prepared, &text)
                });

                let record = match tokio::time::timeout(timeout, task).await {
                    Ok(Ok(record)) => record,
                    Ok(Err(join_error)) => {
                        let error = ScoringError::Aborted {
                            reason: join_error.to_string(),
                        };
                        warn!(candidate = %id, error = %error, "Candidate evaluation aborted");
                        ScoreRecord::failed(error.to_string())
                    }
                    Err(_) => {
                        let error = ScoringError::TimedOut { after: timeout };
                        warn!(candidate = %id, error = %error, "Candidate evaluation timed out");
                        ScoreRecord::failed(error.to_string())
                    }
                };

                Some(CandidateOutcome::Scored {
                    position,
                    id,
                    record,
                })
            }
        });

        let outcomes: Vec<Option<CandidateOutcome>> = evaluations
            .buffered(self.options.max_concurrency.max(1))
            .collect()
            .await;

        // Futures start in input order and the flag never resets, so `None`s form a suffix.
        let stopped = outcomes.iter().any(Option::is_none);
        if stopped {
            info!(total, "Ranking stopped early");
        }
        let outcomes = outcomes.into_iter().map_while(|o| o).collect();

        finish(assemble(outcomes, stopped), total)
    }

    async fn prepare_blocking(&self, query: &str) -> PreparedQuery {
        let evaluator = self.evaluator.clone();
        let text = query.to_string();

        match tokio::task::spawn_blocking(move || evaluator.prepare(&text)).await {
            Ok(prepared) => prepared,
            Err(e) => {
                warn!(error = %e, "Query preparation aborted");
                PreparedQuery::failed(query, e.to_string())
            }
        }
    }
}

fn finish(result: RankingResult, total: usize) -> RankingResult {
    match result.status {
        RankingStatus::NoUsableInput => {
            warn!(
                total,
                skipped = result.skipped.len(),
                "No candidate had usable text"
            );
        }
        _ => {
            info!(
                total,
                ranked = result.stats.count,
                skipped = result.skipped.len(),
                failed = result.failed_count(),
                max = result.stats.max.map(|s| s.value()),
                mean = result.stats.mean.map(|s| s.value()),
                "Ranking finished"
            );
        }
    }
    result
}
