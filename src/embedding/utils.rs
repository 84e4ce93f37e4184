use std::path::Path;

use tokenizers::{Tokenizer, TruncationParams};

use super::error::EmbeddingError;

/// Loads `tokenizer.json` with truncation at `max_len` tokens.
///
/// Sentence encoders have a fixed position-embedding table, so longer inputs must be
/// cut rather than rejected.
pub fn load_tokenizer(tokenizer_path: &Path, max_len: usize) -> Result<Tokenizer, EmbeddingError> {
    let mut tokenizer =
        Tokenizer::from_file(tokenizer_path).map_err(|e| EmbeddingError::TokenizationFailed {
            reason: format!(
                "failed to load tokenizer from {}: {}",
                tokenizer_path.display(),
                e
            ),
        })?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };

    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| EmbeddingError::TokenizationFailed {
            reason: format!("failed to configure truncation: {}", e),
        })?;

    // Single-sequence inference never needs padding.
    tokenizer.with_padding(None);

    Ok(tokenizer)
}

/// Scales a vector to unit length (zero vectors are returned unchanged).
pub fn normalize(mut values: Vec<f32>) -> Vec<f32> {
    let norm: f32 = values.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm > 0.0 {
        for x in &mut values {
            *x /= norm;
        }
    }

    values
}

/// Lower-cased alphanumeric tokens of `text`, in order (duplicates kept).
pub fn lexical_tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

/// Deterministic hashed bag-of-words vector of length `dim`, unit-normalised.
///
/// Texts sharing tokens get positive cosine similarity, identical texts get identical
/// vectors, and text without tokens maps to the zero vector.
pub fn bag_of_words_vector(text: &str, dim: usize) -> Vec<f32> {
    let mut values = vec![0.0f32; dim];
    if dim == 0 {
        return values;
    }

    for token in lexical_tokens(text) {
        values[crate::hashing::token_bucket(&token, dim)] += 1.0;
    }

    normalize(values)
}
