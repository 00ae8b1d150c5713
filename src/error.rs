//! Application error types.
//!
//! Every lookup, resolve, and search failure is returned as a typed value
//! so the presentation layer can render a message and keep its interaction
//! loop alive. Only corpus-load and bookmark I/O failures are fatal.

use std::path::PathBuf;

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable messages
#[derive(Debug, Error)]
pub enum Error {
    /// Reference string matched none of the recognized shapes
    #[error("invalid reference '{0}': use 'Book', 'Book Chapter', 'Book Chapter:Verse' or 'Book Chapter:Verse-Verse'")]
    InvalidReferenceFormat(String),

    /// Book resolution failed while executing a lookup
    #[error("no book found for '{0}'")]
    BookNotFound(String),

    /// No canonical name scored at or above the similarity threshold
    #[error("no close match for book '{0}'")]
    NoBookMatch(String),

    /// A chapter or verse field was not a number
    #[error("'{0}' is not a number: chapter and verse must be digits")]
    NotANumber(String),

    /// Chapter outside the book's range
    #[error("chapter {chapter} is out of range: {book} has {max} chapters")]
    ChapterOutOfRange {
        /// Canonical book name.
        book: String,
        /// The chapter that was requested.
        chapter: u32,
        /// Number of chapters the book actually has.
        max: u32,
    },

    /// Start verse outside the chapter's range
    #[error("verse {verse} is out of range: {book} chapter {chapter} has {max} verses")]
    VerseOutOfRange {
        /// Canonical book name.
        book: String,
        /// The chapter that was requested.
        chapter: u32,
        /// The verse that was requested.
        verse: u32,
        /// Number of verses the chapter actually has.
        max: u32,
    },

    /// End verse below the start verse or beyond the chapter
    #[error("verse range {start}-{end} is out of range: {book} chapter {chapter} has {max} verses")]
    VerseRangeOutOfRange {
        /// Canonical book name.
        book: String,
        /// The chapter that was requested.
        chapter: u32,
        /// First verse of the requested range.
        start: u32,
        /// Last verse of the requested range.
        end: u32,
        /// Number of verses the chapter actually has.
        max: u32,
    },

    /// Search pattern failed to compile as a regular expression
    #[error("invalid search pattern: {0}")]
    InvalidPattern(String),

    /// Lookup produced no verses
    #[error("no verses found")]
    NotFound,

    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<PathBuf>,
    },

    /// File parsing error
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }

    /// Create a config error with actionable hint
    #[allow(dead_code)]
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }
}

// Convenience conversion for callers without path context
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn range_errors_state_the_valid_bound() {
        let err = Error::ChapterOutOfRange { book: "Genesis".to_string(), chapter: 100, max: 50 };
        assert_eq!(err.to_string(), "chapter 100 is out of range: Genesis has 50 chapters");

        let err = Error::VerseRangeOutOfRange {
            book: "John".to_string(),
            chapter: 3,
            start: 16,
            end: 99,
            max: 36,
        };
        assert!(err.to_string().contains("has 36 verses"));
    }

    #[test]
    fn io_helper_keeps_path_context() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::io(source, PathBuf::from("dataset.json"));
        match err {
            Error::Io { path: Some(p), .. } => assert_eq!(p, PathBuf::from("dataset.json")),
            _ => panic!("expected Io error with path"),
        }
    }
}
