//! Corpus-order keyword and regex search.
//!
//! Scans every verse in corpus order (book x chapter x verse) and reports
//! matches as byte spans against the unmodified text; highlighting is a
//! rendering concern. Ordering is part of the contract: the same query
//! over the same corpus yields the same sequence.

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::corpus::{Corpus, Testament};
use crate::error::{Error, Result};

/// Filters applied on top of pattern matching.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Treat the pattern as a regular expression instead of a literal.
    pub regex: bool,
    /// Keep only verses from this testament.
    pub testament: Option<Testament>,
    /// Inclusive lower bound on whitespace-delimited word count.
    pub min_words: Option<usize>,
    /// Inclusive upper bound on whitespace-delimited word count.
    pub max_words: Option<usize>,
}

/// A single matching verse with its match spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Canonical book name.
    pub book: String,
    /// 1-based chapter number.
    pub chapter: u32,
    /// 1-based verse number.
    pub verse: u32,
    /// Unmodified verse text.
    pub text: String,
    /// Byte ranges of every match within `text`, in order.
    pub spans: Vec<(usize, usize)>,
}

impl SearchHit {
    /// Canonical display reference, e.g. "John 3:16".
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {}:{}", self.book, self.chapter, self.verse)
    }
}

/// Compile the pattern. Literals are escaped first; both forms match
/// case-insensitively.
fn compile(pattern: &str, as_regex: bool) -> Result<Regex> {
    let source = if as_regex { pattern.to_string() } else { regex::escape(pattern) };
    RegexBuilder::new(&source)
        .case_insensitive(true)
        .build()
        .map_err(|e| Error::InvalidPattern(e.to_string()))
}

/// True when the verse's word count falls inside the configured bounds.
fn word_count_within(text: &str, options: &SearchOptions) -> bool {
    if options.min_words.is_none() && options.max_words.is_none() {
        return true;
    }
    let words = text.split_whitespace().count();
    options.min_words.map_or(true, |min| words >= min)
        && options.max_words.map_or(true, |max| words <= max)
}

/// Scan every verse in corpus order and report matches with their spans.
///
/// Filters narrow the result set without affecting ordering. Invalid
/// regex syntax fails [`Error::InvalidPattern`] before any scanning.
pub fn search(corpus: &Corpus, pattern: &str, options: &SearchOptions) -> Result<Vec<SearchHit>> {
    let matcher = compile(pattern, options.regex)?;
    let mut hits = Vec::new();

    for book in corpus.books() {
        if let Some(testament) = options.testament {
            if Testament::of(&book.name) != testament {
                continue;
            }
        }
        for (chapter_idx, chapter) in book.chapters.iter().enumerate() {
            for (verse_idx, text) in chapter.iter().enumerate() {
                let spans: Vec<(usize, usize)> =
                    matcher.find_iter(text).map(|m| (m.start(), m.end())).collect();
                if spans.is_empty() || !word_count_within(text, options) {
                    continue;
                }
                hits.push(SearchHit {
                    book: book.name.clone(),
                    chapter: chapter_idx as u32 + 1,
                    verse: verse_idx as u32 + 1,
                    text: text.clone(),
                    spans,
                });
            }
        }
    }

    debug!(pattern, hits = hits.len(), "search complete");
    Ok(hits)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::corpus::Book;

    fn corpus() -> Corpus {
        Corpus::new(vec![
            Book {
                name: "Genesis".to_string(),
                chapters: vec![vec![
                    "In the beginning God created the heaven and the earth.".to_string(),
                    "And God said, Let there be light: and there was light.".to_string(),
                    "And God divided the light from the darkness.".to_string(),
                ]],
            },
            Book {
                name: "John".to_string(),
                chapters: vec![vec![
                    "For God so loved the world.".to_string(),
                    "He was not that Light, but was sent to bear witness of that Light."
                        .to_string(),
                ]],
            },
        ])
    }

    #[test]
    fn literal_search_is_case_insensitive_and_ordered() {
        let c = corpus();
        let hits = search(&c, "god", &SearchOptions::default()).unwrap();
        assert_eq!(hits.len(), 4);
        assert!(hits.iter().all(|h| h.text.to_lowercase().contains("god")));
        // Corpus traversal order: Genesis before John, verses in order
        assert_eq!(hits[0].display(), "Genesis 1:1");
        assert_eq!(hits[3].display(), "John 1:1");
    }

    #[test]
    fn spans_point_at_the_matched_text() {
        let c = corpus();
        let hits = search(&c, "Light", &SearchOptions::default()).unwrap();
        for hit in &hits {
            for &(start, end) in &hit.spans {
                assert_eq!(hit.text[start..end].to_lowercase(), "light");
            }
        }
        // Two occurrences in one verse produce two spans
        let witness = hits.iter().find(|h| h.book == "John" && h.verse == 2).unwrap();
        assert_eq!(witness.spans.len(), 2);
    }

    #[test]
    fn literal_patterns_are_escaped() {
        let c = corpus();
        // A regex metacharacter in literal mode matches nothing rather than erroring
        let hits = search(&c, "light.*darkness", &SearchOptions::default()).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn regex_search_matches_across_words() {
        let c = corpus();
        let options = SearchOptions { regex: true, ..SearchOptions::default() };
        let hits = search(&c, "light.*darkness", &options).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].book, "Genesis");
        assert_eq!(hits[0].verse, 3);
    }

    #[test]
    fn invalid_regex_is_a_typed_failure() {
        let c = corpus();
        let options = SearchOptions { regex: true, ..SearchOptions::default() };
        assert!(matches!(search(&c, "[unclosed", &options), Err(Error::InvalidPattern(_))));
    }

    #[test]
    fn testament_filter_narrows_without_reordering() {
        let c = corpus();
        let options =
            SearchOptions { testament: Some(Testament::New), ..SearchOptions::default() };
        let hits = search(&c, "God", &options).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].book, "John");

        let options =
            SearchOptions { testament: Some(Testament::Old), ..SearchOptions::default() };
        let hits = search(&c, "God", &options).unwrap();
        assert!(hits.iter().all(|h| h.book == "Genesis"));
    }

    #[test]
    fn word_count_bounds_are_inclusive() {
        let c = corpus();
        let options = SearchOptions {
            min_words: Some(6),
            max_words: Some(7),
            ..SearchOptions::default()
        };
        let hits = search(&c, "God", &options).unwrap();
        // "For God so loved the world." has 6 words,
        // "And God divided the light from the darkness." has 8.
        assert!(hits.iter().any(|h| h.book == "John"));
        assert!(hits.iter().all(|h| {
            let words = h.text.split_whitespace().count();
            (6..=7).contains(&words)
        }));
    }

    #[test]
    fn search_is_restartable() {
        let c = corpus();
        let first = search(&c, "light", &SearchOptions::default()).unwrap();
        let second = search(&c, "light", &SearchOptions::default()).unwrap();
        assert_eq!(first, second);
    }
}
