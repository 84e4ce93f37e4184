//! Keyword extraction and overlap analysis.
//!
//! Keywords are maximal runs of ASCII letters, lower-cased, at least
//! [`MIN_KEYWORD_LEN`](crate::constants::MIN_KEYWORD_LEN) long. Digits and punctuation
//! split runs and are never part of a keyword. No stemming or stop-word list.

pub mod matcher;


pub use matcher::{KeywordComparison, compare};

use std::collections::BTreeSet;

use crate::constants::MIN_KEYWORD_LEN;

/// Set of normalized keywords extracted from a text.
///
/// Backed by a `BTreeSet`, so iteration is alphabetical and truncation downstream is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    terms: BTreeSet<String>,
}

impl KeywordSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keywords.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if no keywords were extracted.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns `true` if `term` is in the set (exact, already-normalized match).
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    /// Iterates keywords in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// Keywords present in both sets, alphabetical.
    pub fn intersection<'a>(&'a self, other: &'a KeywordSet) -> impl Iterator<Item = &'a str> {
        self.terms.intersection(&other.terms).map(String::as_str)
    }

    /// Keywords in `self` but not in `other`, alphabetical.
    pub fn difference<'a>(&'a self, other: &'a KeywordSet) -> impl Iterator<Item = &'a str> {
        self.terms.difference(&other.terms).map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Extracts the keyword set of `text`.
///
/// Empty or non-alphabetic input yields an empty set.
pub fn extract_keywords(text: &str) -> KeywordSet {
    let mut terms = BTreeSet::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_ascii_alphabetic() {
            current.push(ch.to_ascii_lowercase());
        } else {
            flush_run(&mut current, &mut terms);
        }
    }
    flush_run(&mut current, &mut terms);

    KeywordSet { terms }
}

fn flush_run(current: &mut String, terms: &mut BTreeSet<String>) {
    if current.len() >= MIN_KEYWORD_LEN {
        terms.insert(std::mem::take(current));
    } else {
        current.clear();
    }
}
