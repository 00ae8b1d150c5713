//! Scripture reference parsing.
//!
//! Classifies a free-form reference string into one of four shapes, in
//! priority order: bare book, book + chapter, book + chapter:verse, and
//! book + chapter:verse-verse. A leading ordinal (`I `, `II `, `III `,
//! `1 `, `2 `, `3 `) is part of the book name, never the chapter.

// Allow unwrap for compile-time constant regex patterns in lazy_static blocks
#![allow(clippy::unwrap_used)]

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};

lazy_static! {
    /// `Book`: an optional ordinal prefix, then no digits at all.
    static ref BOOK_ONLY: Regex =
        Regex::new(r"^(?:(?:I{1,3}|[123])\s+)?\D+$").unwrap();

    /// `Book Chapter`: trailing digit run, not followed by a colon.
    static ref BOOK_CHAPTER: Regex =
        Regex::new(r"^((?:(?:I{1,3}|[123])\s+)?\D+)\s+(\d+)$").unwrap();

    /// `Book Chapter:Verse` with an optional `-EndVerse`.
    static ref BOOK_CHAPTER_VERSE: Regex =
        Regex::new(r"^((?:(?:I{1,3}|[123])\s+)?\D+)\s+(\d+):(\d+)(?:-(\d+))?$").unwrap();
}

/// A classified scripture reference.
///
/// Chapter and verse numbers are 1-based, as typed by the user; the book
/// name is still raw (possibly misspelled) and must go through the
/// resolver before lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedReference {
    /// Bare book name; chapter and verse default to 1.
    Book {
        /// Book name as typed, ordinal prefix included.
        book: String,
    },
    /// Book plus chapter.
    Chapter {
        /// Book name as typed.
        book: String,
        /// 1-based chapter number.
        chapter: u32,
    },
    /// Book, chapter, and a single verse.
    Verse {
        /// Book name as typed.
        book: String,
        /// 1-based chapter number.
        chapter: u32,
        /// 1-based verse number.
        verse: u32,
    },
    /// Book, chapter, and an inclusive verse range.
    Range {
        /// Book name as typed.
        book: String,
        /// 1-based chapter number.
        chapter: u32,
        /// First verse of the range.
        start: u32,
        /// Last verse of the range.
        end: u32,
    },
}

impl ParsedReference {
    /// The raw book name carried by any shape.
    #[must_use]
    pub fn book(&self) -> &str {
        match self {
            Self::Book { book }
            | Self::Chapter { book, .. }
            | Self::Verse { book, .. }
            | Self::Range { book, .. } => book,
        }
    }
}

/// Coerce a chapter or verse field to a number.
///
/// Digit runs too large for `u32` fail the same way as non-numeric input.
pub fn parse_number(field: &str) -> Result<u32> {
    field
        .trim()
        .parse()
        .map_err(|_| Error::NotANumber(field.trim().to_string()))
}

/// Parse a free-form reference string into one of the four shapes.
///
/// Shapes are tried in priority order and the first match wins; a string
/// matching none of them fails with the offending input echoed back.
pub fn parse(input: &str) -> Result<ParsedReference> {
    let input = input.trim();

    if BOOK_ONLY.is_match(input) {
        return Ok(ParsedReference::Book { book: input.to_string() });
    }

    if let Some(captures) = BOOK_CHAPTER.captures(input) {
        return Ok(ParsedReference::Chapter {
            book: captures[1].trim().to_string(),
            chapter: parse_number(&captures[2])?,
        });
    }

    if let Some(captures) = BOOK_CHAPTER_VERSE.captures(input) {
        let book = captures[1].trim().to_string();
        let chapter = parse_number(&captures[2])?;
        let start = parse_number(&captures[3])?;
        return match captures.get(4) {
            Some(end) => Ok(ParsedReference::Range {
                book,
                chapter,
                start,
                end: parse_number(end.as_str())?,
            }),
            None => Ok(ParsedReference::Verse { book, chapter, verse: start }),
        };
    }

    Err(Error::InvalidReferenceFormat(input.to_string()))
}
