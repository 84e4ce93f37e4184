//! Candidate scoring: embedding similarity plus keyword evidence.
//!
//! [`CandidateEvaluator`] is the unit of per-candidate isolation. It is the only place
//! where the semantic score and the keyword explanation are combined, and it never
//! returns an error: empty input and failed computations become degenerate
//! [`ScoreRecord`]s with score 0 and a [`RecordStatus`] saying why.

pub mod error;
pub mod evaluator;
pub mod similarity;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ScoringError;
pub use evaluator::{CandidateEvaluator, PreparedQuery};
pub use similarity::{cosine_similarity, similarity_score};
pub use types::{KeywordEvidence, RecordStatus, Score, ScoreRecord};
