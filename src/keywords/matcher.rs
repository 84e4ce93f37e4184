use serde::Serialize;

use super::KeywordSet;
use crate::constants::MAX_DISPLAY_KEYWORDS;

/// Lexical overlap between a query keyword set and a candidate keyword set.
///
/// `matched`/`missing` are alphabetical and capped at [`MAX_DISPLAY_KEYWORDS`];
/// the `*_total` counts are the uncapped sizes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeywordComparison {
    /// Query keywords also present in the candidate.
    pub matched: Vec<String>,
    /// Query keywords absent from the candidate.
    pub missing: Vec<String>,
    /// Size of the full intersection.
    pub matched_total: usize,
    /// Size of the full difference.
    pub missing_total: usize,
}

/// Compares `query` keywords against `candidate` keywords.
pub fn compare(query: &KeywordSet, candidate: &KeywordSet) -> KeywordComparison {
    compare_with_cap(query, candidate, MAX_DISPLAY_KEYWORDS)
}

/// Same as [`compare`] with an explicit display cap.
pub fn compare_with_cap(
    query: &KeywordSet,
    candidate: &KeywordSet,
    cap: usize,
) -> KeywordComparison {
    let matched_total = query.intersection(candidate).count();
    let missing_total = query.len() - matched_total;

    KeywordComparison {
        matched: query
            .intersection(candidate)
            .take(cap)
            .map(str::to_string)
            .collect(),
        missing: query
            .difference(candidate)
            .take(cap)
            .map(str::to_string)
            .collect(),
        matched_total,
        missing_total,
    }
}
