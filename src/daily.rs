//! Deterministic daily verse selection.
//!
//! The generator is seeded with the calendar date, so the same date always
//! selects the same verse for a given corpus. Determinism holds within one
//! build of this tool; bit-compatibility with other ecosystems is not a
//! goal.

use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::corpus::Corpus;
use crate::error::{Error, Result};

/// A single located verse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseRef {
    /// Canonical book name.
    pub book: String,
    /// 1-based chapter number.
    pub chapter: u32,
    /// 1-based verse number.
    pub verse: u32,
    /// Verse text.
    pub text: String,
}

impl VerseRef {
    /// Canonical display reference, e.g. "John 3:16".
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {}:{}", self.book, self.chapter, self.verse)
    }
}

/// The date as a YYYYMMDD integer seed.
fn date_seed(date: NaiveDate) -> u64 {
    let year = u64::try_from(date.year()).unwrap_or(0);
    year * 10_000 + u64::from(date.month()) * 100 + u64::from(date.day())
}

/// Pick the verse of the day: a uniformly random book, then a chapter
/// within it, then a verse within that, under the date seed.
pub fn daily_verse(corpus: &Corpus, date: NaiveDate) -> Result<VerseRef> {
    if corpus.is_empty() {
        return Err(Error::NotFound);
    }

    let mut rng = StdRng::seed_from_u64(date_seed(date));
    let book = &corpus.books()[rng.gen_range(0..corpus.len())];
    if book.chapters.is_empty() {
        return Err(Error::NotFound);
    }
    let chapter_idx = rng.gen_range(0..book.chapters.len());
    let chapter = &book.chapters[chapter_idx];
    if chapter.is_empty() {
        return Err(Error::NotFound);
    }
    let verse_idx = rng.gen_range(0..chapter.len());

    Ok(VerseRef {
        book: book.name.clone(),
        chapter: chapter_idx as u32 + 1,
        verse: verse_idx as u32 + 1,
        text: chapter[verse_idx].clone(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::corpus::Book;

    fn corpus() -> Corpus {
        let books = (1..=5)
            .map(|b| Book {
                name: format!("Book {b}"),
                chapters: (1..=4)
                    .map(|c| (1..=10).map(|v| format!("text {b}.{c}.{v}")).collect())
                    .collect(),
            })
            .collect();
        Corpus::new(books)
    }

    #[test]
    fn same_date_same_verse() {
        let c = corpus();
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let first = daily_verse(&c, date).unwrap();
        let second = daily_verse(&c, date).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn selection_is_within_corpus_bounds() {
        let c = corpus();
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let verse = daily_verse(&c, date).unwrap();
        let book = c.get(&verse.book).unwrap();
        let chapter = book.chapter(verse.chapter).unwrap();
        assert_eq!(chapter[(verse.verse - 1) as usize], verse.text);
    }

    #[test]
    fn empty_corpus_has_no_daily_verse() {
        let c = Corpus::new(Vec::new());
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(matches!(daily_verse(&c, date), Err(Error::NotFound)));
    }

    #[test]
    fn seed_encodes_the_date_digits() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(date_seed(date), 20_240_309);
    }
}
