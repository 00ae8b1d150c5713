//! Fuzzy book name resolution.
//!
//! Maps a user-typed book name (possibly misspelled, possibly
//! Roman-numeral-prefixed) to its canonical corpus spelling: ordinal
//! normalization, then an exact case-insensitive hit, then a normalized
//! Levenshtein ratio over every canonical name. The resolver performs no
//! I/O; interactive confirmation is injected through [`ConfirmMatch`].

use tracing::debug;

use crate::constants::resolver::MIN_MATCH_SCORE;
use crate::corpus::{Book, Corpus};
use crate::error::{Error, Result};

/// Confirmation hook for fuzzy matches.
///
/// When a name only resolves approximately, the candidate is offered to
/// this hook before being accepted. Interactive callers prompt the user;
/// batch callers use [`AutoAccept`].
pub trait ConfirmMatch {
    /// Return true to accept the candidate canonical name.
    fn confirm(&self, candidate: &str) -> bool;
}

/// Accepts every candidate at or above the similarity threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoAccept;

impl ConfirmMatch for AutoAccept {
    fn confirm(&self, _candidate: &str) -> bool {
        true
    }
}

/// Rewrite a leading Roman-numeral ordinal (`I `, `II `, `III `) to its
/// Arabic form so "II John" and "2 John" compare equal.
fn normalize_ordinal(name: &str) -> String {
    // Longest prefix first so "III " is not consumed as "I " + "II".
    for (roman, arabic) in [("III ", "3 "), ("II ", "2 "), ("I ", "1 ")] {
        if let Some(prefix) = name.get(..roman.len()) {
            if prefix.eq_ignore_ascii_case(roman) {
                return format!("{arabic}{}", &name[roman.len()..]);
            }
        }
    }
    name.to_string()
}

/// Similarity between two already-normalized names on a 0-100 scale.
fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b) * 100.0
}

/// Resolve a user-typed book name to its canonical corpus spelling.
///
/// An exact case-insensitive match (after ordinal normalization) returns
/// immediately. Otherwise the highest-scoring canonical name is offered to
/// `confirm`; ties break to the first candidate in corpus order. Scores
/// below the threshold, and declined confirmations, fail with
/// [`Error::NoBookMatch`].
pub fn resolve(corpus: &Corpus, raw: &str, confirm: &dyn ConfirmMatch) -> Result<String> {
    let normalized = normalize_ordinal(raw.trim()).to_lowercase();

    if let Some(book) = corpus.get(&normalized) {
        return Ok(book.name.clone());
    }

    let mut best: Option<(&Book, f64)> = None;
    for book in corpus.books() {
        let candidate = normalize_ordinal(&book.name).to_lowercase();
        let score = similarity(&normalized, &candidate);
        // Strict comparison keeps the first maximum, stable in corpus order
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((book, score));
        }
    }

    match best {
        Some((book, score)) if score >= MIN_MATCH_SCORE => {
            debug!(raw, candidate = %book.name, score, "fuzzy book match");
            if confirm.confirm(&book.name) {
                Ok(book.name.clone())
            } else {
                Err(Error::NoBookMatch(raw.trim().to_string()))
            }
        }
        _ => Err(Error::NoBookMatch(raw.trim().to_string())),
    }
}
