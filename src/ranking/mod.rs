//! Batch ranking of candidate documents against one query.
//!
//! [`BatchRanker`] evaluates every document with a [`CandidateEvaluator`], skips documents
//! without text (reporting them in [`RankingResult::skipped`]) and orders the rest by score,
//! highest first. Equal scores keep their input order.
//!
//! The synchronous path ([`BatchRanker::rank`]) processes candidates one by one. The async
//! path ([`BatchRanker::rank_async`]) moves inference onto tokio's blocking pool, bounds
//! each candidate with a timeout and can run several candidates at once.
//!
//! [`CandidateEvaluator`]: crate::scoring::CandidateEvaluator

pub mod ranker;
pub mod types;


pub use ranker::{BatchRanker, CandidateOutcome, RankerOptions, assemble};
pub use types::{
    Document, RankedEntry, RankingResult, RankingStats, RankingStatus, SkipReason,
    SkippedDocument, StopSignal,
};
