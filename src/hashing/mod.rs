//! BLAKE3 helpers for cache keys and stub embedding buckets.

/// Full 32-byte BLAKE3 hash of a text (used as the embedding cache key).
#[inline]
pub fn hash_text(text: &str) -> [u8; 32] {
    *blake3::hash(text.as_bytes()).as_bytes()
}

/// Computes a 64-bit hash of the input data using BLAKE3, truncated from 256 bits.
///
/// Stable across processes and platforms, unlike `std::hash::DefaultHasher`, so stub
/// embeddings stay reproducible between runs.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    u64::from_le_bytes(bytes)
}

/// Maps a token to a bucket in `0..buckets`.
#[inline]
pub fn token_bucket(token: &str, buckets: usize) -> usize {
    debug_assert!(buckets > 0);
    (hash_to_u64(token.as_bytes()) % buckets as u64) as usize
}
