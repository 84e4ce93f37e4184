//! Cosine similarity → bounded integer score.

use super::error::ScoringError;
use super::types::Score;
use crate::embedding::Embedding;

/// Cosine similarity of two equal-length vectors (0.0 if either has zero norm).
///
/// # Panics
///
/// Panics if the lengths differ. Mixed dimensions mean embeddings from different
/// provider configurations were combined, which is an integration bug.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(
        a.len(),
        b.len(),
        "embedding dimension mismatch: {} vs {}",
        a.len(),
        b.len()
    );

    let (dot, norm_a_sq, norm_b_sq) =
        a.iter()
            .zip(b.iter())
            .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&av, &bv)| {
                (dot + av * bv, na + av * av, nb + bv * bv)
            });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

/// Scores two embeddings in `0..=100`.
///
/// Fails only if the similarity is not a finite number.
pub fn similarity_score(a: &Embedding, b: &Embedding) -> Result<Score, ScoringError> {
    let raw = cosine_similarity(a.as_slice(), b.as_slice());
    if !raw.is_finite() {
        return Err(ScoringError::ComputationFailed {
            reason: format!("cosine similarity is not finite ({raw})"),
        });
    }
    Ok(Score::from_similarity(raw))
}
