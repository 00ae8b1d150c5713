//! Corpus loading and the in-memory book/chapter/verse store.
//!
//! The corpus is loaded wholesale at startup and treated as read-only for
//! the rest of the process. It is an explicitly constructed value owned by
//! the caller and handed by reference to the resolver, lookup, and search
//! components.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use tracing::info;

use crate::error::{Error, Result};

/// Canonical names of the 27 New Testament books. Any book outside this
/// set is treated as Old Testament.
pub const NEW_TESTAMENT_BOOKS: [&str; 27] = [
    "Matthew",
    "Mark",
    "Luke",
    "John",
    "Acts",
    "Romans",
    "1 Corinthians",
    "2 Corinthians",
    "Galatians",
    "Ephesians",
    "Philippians",
    "Colossians",
    "1 Thessalonians",
    "2 Thessalonians",
    "1 Timothy",
    "2 Timothy",
    "Titus",
    "Philemon",
    "Hebrews",
    "James",
    "1 Peter",
    "2 Peter",
    "1 John",
    "2 John",
    "3 John",
    "Jude",
    "Revelation",
];

/// Testament partition of the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Testament {
    /// Every book outside the New Testament set.
    Old,
    /// The fixed 27-book New Testament set.
    New,
}

impl Testament {
    /// Classify a canonical book name.
    #[must_use]
    pub fn of(book_name: &str) -> Self {
        if NEW_TESTAMENT_BOOKS.contains(&book_name) {
            Self::New
        } else {
            Self::Old
        }
    }
}

impl FromStr for Testament {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "old" => Ok(Self::Old),
            "new" => Ok(Self::New),
            other => Err(format!("unknown testament '{other}': expected 'old' or 'new'")),
        }
    }
}

/// A single book: canonical name plus chapters of verses.
#[derive(Debug, Clone, Deserialize)]
pub struct Book {
    /// Canonical book name (e.g. "Genesis", "1 John")
    pub name: String,
    /// Chapters in order; each chapter is its verses in order
    pub chapters: Vec<Vec<String>>,
}

impl Book {
    /// Number of chapters in this book.
    #[must_use]
    pub fn chapter_count(&self) -> u32 {
        self.chapters.len() as u32
    }

    /// Verses of the given 1-based chapter, if it exists.
    #[must_use]
    pub fn chapter(&self, chapter: u32) -> Option<&[String]> {
        if chapter < 1 {
            return None;
        }
        self.chapters.get((chapter - 1) as usize).map(Vec::as_slice)
    }
}

/// The loaded corpus: ordered books plus a case-insensitive name index.
#[derive(Debug, Clone)]
pub struct Corpus {
    books: Vec<Book>,
    index: HashMap<String, usize>,
}

impl Corpus {
    /// Build a corpus from already-decoded books.
    #[must_use]
    pub fn new(books: Vec<Book>) -> Self {
        let index = books
            .iter()
            .enumerate()
            .map(|(i, book)| (book.name.to_lowercase(), i))
            .collect();
        Self { books, index }
    }

    /// Load the corpus from a JSON file.
    ///
    /// Failure here (missing file, malformed structure) is fatal to the
    /// process: without a corpus nothing else can function.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path)
            .map_err(|e| Error::io(e, path.to_path_buf()))?;
        let books: Vec<Book> = serde_json::from_str(&content)
            .map_err(|e| Error::parse(e.to_string(), path.to_path_buf()))?;
        info!(path = %path.display(), books = books.len(), "corpus loaded");
        Ok(Self::new(books))
    }

    /// Books in corpus order.
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Case-insensitive lookup by canonical name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Book> {
        self.index.get(&name.to_lowercase()).map(|&i| &self.books[i])
    }

    /// Number of books in the corpus.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// True when the corpus holds no books.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn two_books() -> Corpus {
        Corpus::new(vec![
            Book {
                name: "Genesis".to_string(),
                chapters: vec![vec!["v1".to_string(), "v2".to_string()], vec!["v1".to_string()]],
            },
            Book { name: "1 John".to_string(), chapters: vec![vec!["v1".to_string()]] },
        ])
    }

    #[test]
    fn index_is_case_insensitive() {
        let corpus = two_books();
        assert_eq!(corpus.get("genesis").unwrap().name, "Genesis");
        assert_eq!(corpus.get("GENESIS").unwrap().name, "Genesis");
        assert_eq!(corpus.get("1 john").unwrap().name, "1 John");
        assert!(corpus.get("Exodus").is_none());
    }

    #[test]
    fn chapter_access_is_one_based() {
        let corpus = two_books();
        let genesis = corpus.get("Genesis").unwrap();
        assert_eq!(genesis.chapter_count(), 2);
        assert_eq!(genesis.chapter(1).unwrap().len(), 2);
        assert_eq!(genesis.chapter(2).unwrap().len(), 1);
        assert!(genesis.chapter(0).is_none());
        assert!(genesis.chapter(3).is_none());
    }

    #[test]
    fn testament_membership_is_fixed() {
        assert_eq!(Testament::of("Matthew"), Testament::New);
        assert_eq!(Testament::of("Revelation"), Testament::New);
        assert_eq!(Testament::of("Genesis"), Testament::Old);
        // Unknown names fall through to Old
        assert_eq!(Testament::of("Not A Book"), Testament::Old);
        assert_eq!(NEW_TESTAMENT_BOOKS.len(), 27);
    }

    #[test]
    fn testament_parses_from_user_input() {
        assert_eq!("new".parse::<Testament>().unwrap(), Testament::New);
        assert_eq!("OLD".parse::<Testament>().unwrap(), Testament::Old);
        assert!("both".parse::<Testament>().is_err());
    }

    #[test]
    fn corpus_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.json");
        std::fs::write(&path, "{not json").unwrap();
        match Corpus::load(&path) {
            Err(Error::Parse { file: Some(f), .. }) => assert_eq!(f, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn corpus_reports_missing_file_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        match Corpus::load(&path) {
            Err(Error::Io { path: Some(p), .. }) => assert_eq!(p, path),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
