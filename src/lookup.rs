//! Range-validated verse lookup and reference execution.
//!
//! Every bound is checked before slicing: chapter against the book,
//! start verse against the chapter, end verse against both. Lookups are
//! deterministic, side-effect free, and never return an empty passage.

use tracing::debug;

use crate::corpus::{Book, Corpus};
use crate::error::{Error, Result};
use crate::reference::{parse_number, ParsedReference};
use crate::resolve::{self, ConfirmMatch};

/// A resolved run of verses from a single chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passage {
    /// Canonical book name.
    pub book: String,
    /// 1-based chapter number.
    pub chapter: u32,
    /// 1-based number of the first verse in `verses`.
    pub start_verse: u32,
    /// Verse texts in order; never empty.
    pub verses: Vec<String>,
}

impl Passage {
    /// 1-based number of the last verse in the passage.
    #[must_use]
    pub fn end_verse(&self) -> u32 {
        self.start_verse + self.verses.len() as u32 - 1
    }

    /// Canonical display reference, e.g. "John 3:16" or "John 3:16-18".
    #[must_use]
    pub fn display(&self) -> String {
        if self.verses.len() == 1 {
            format!("{} {}:{}", self.book, self.chapter, self.start_verse)
        } else {
            format!("{} {}:{}-{}", self.book, self.chapter, self.start_verse, self.end_verse())
        }
    }
}

/// The shape-tagged result of executing a parsed reference.
///
/// Each shape carries its own well-typed payload instead of a caller
/// inspecting a runtime type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    /// Every chapter of a book.
    Book {
        /// Canonical book name.
        name: String,
        /// All chapters in order, each its verses in order.
        chapters: Vec<Vec<String>>,
    },
    /// Every verse of a single chapter.
    Chapter(Passage),
    /// A single verse.
    Verse(Passage),
    /// An inclusive verse range.
    Range(Passage),
}

/// Resolution failures surface as `BookNotFound` at the lookup boundary.
fn book_not_found(err: Error) -> Error {
    match err {
        Error::NoBookMatch(name) => Error::BookNotFound(name),
        other => other,
    }
}

/// Resolve the raw book name and return its corpus entry.
fn resolve_book<'a>(
    corpus: &'a Corpus,
    book: &str,
    confirm: &dyn ConfirmMatch,
) -> Result<&'a Book> {
    let canonical = resolve::resolve(corpus, book, confirm).map_err(book_not_found)?;
    corpus.get(&canonical).ok_or(Error::NotFound)
}

/// Slice an inclusive, 1-based verse range out of one chapter.
fn slice_chapter(book: &Book, chapter: u32, start: u32, end: Option<u32>) -> Result<Passage> {
    let chapter_count = book.chapter_count();
    if chapter < 1 || chapter > chapter_count {
        return Err(Error::ChapterOutOfRange {
            book: book.name.clone(),
            chapter,
            max: chapter_count,
        });
    }

    let verses = book.chapter(chapter).ok_or(Error::NotFound)?;
    let max = verses.len() as u32;
    if start < 1 || start > max {
        return Err(Error::VerseOutOfRange { book: book.name.clone(), chapter, verse: start, max });
    }

    let end = end.unwrap_or(start);
    if end < start || end > max {
        return Err(Error::VerseRangeOutOfRange {
            book: book.name.clone(),
            chapter,
            start,
            end,
            max,
        });
    }

    let slice = verses[(start - 1) as usize..end as usize].to_vec();
    if slice.is_empty() {
        return Err(Error::NotFound);
    }

    Ok(Passage { book: book.name.clone(), chapter, start_verse: start, verses: slice })
}

/// Look up an inclusive verse range.
///
/// `end` defaults to `start` for a single-verse lookup. The returned
/// passage carries the canonical book name, the chapter, the start verse,
/// and the verse texts in order.
pub fn lookup(
    corpus: &Corpus,
    book: &str,
    chapter: u32,
    start: u32,
    end: Option<u32>,
    confirm: &dyn ConfirmMatch,
) -> Result<Passage> {
    let book = resolve_book(corpus, book, confirm)?;
    let passage = slice_chapter(book, chapter, start, end)?;
    debug!(reference = %passage.display(), verses = passage.verses.len(), "lookup");
    Ok(passage)
}

/// Look up with chapter and verse fields as they arrive from a command
/// line, coercing each to a number first.
pub fn lookup_raw(
    corpus: &Corpus,
    book: &str,
    chapter: &str,
    start: &str,
    end: Option<&str>,
    confirm: &dyn ConfirmMatch,
) -> Result<Passage> {
    let chapter = parse_number(chapter)?;
    let start = parse_number(start)?;
    let end = end.map(parse_number).transpose()?;
    lookup(corpus, book, chapter, start, end, confirm)
}

/// Every verse of a chapter as a passage starting at verse 1.
pub fn whole_chapter(
    corpus: &Corpus,
    book: &str,
    chapter: u32,
    confirm: &dyn ConfirmMatch,
) -> Result<Passage> {
    let book = resolve_book(corpus, book, confirm)?;
    let chapter_count = book.chapter_count();
    if chapter < 1 || chapter > chapter_count {
        return Err(Error::ChapterOutOfRange {
            book: book.name.clone(),
            chapter,
            max: chapter_count,
        });
    }
    let verses = book.chapter(chapter).ok_or(Error::NotFound)?;
    let max = verses.len() as u32;
    slice_chapter(book, chapter, 1, Some(max))
}

/// Execute a classified reference into its shape-tagged result.
///
/// A bare book yields the whole book, book + chapter the whole chapter,
/// and the two verse shapes their validated passages.
pub fn execute(
    corpus: &Corpus,
    reference: &ParsedReference,
    confirm: &dyn ConfirmMatch,
) -> Result<LookupResult> {
    match reference {
        ParsedReference::Book { book } => {
            let book = resolve_book(corpus, book, confirm)?;
            Ok(LookupResult::Book { name: book.name.clone(), chapters: book.chapters.clone() })
        }
        ParsedReference::Chapter { book, chapter } => {
            Ok(LookupResult::Chapter(whole_chapter(corpus, book, *chapter, confirm)?))
        }
        ParsedReference::Verse { book, chapter, verse } => {
            Ok(LookupResult::Verse(lookup(corpus, book, *chapter, *verse, None, confirm)?))
        }
        ParsedReference::Range { book, chapter, start, end } => {
            Ok(LookupResult::Range(lookup(corpus, book, *chapter, *start, Some(*end), confirm)?))
        }
    }
}

/// Consecutive verses around a target, clipped at chapter boundaries.
///
/// Returns `(verse_number, text)` pairs covering up to `2 * window + 1`
/// verses centered on `verse`. Out-of-range input fails with the matching
/// range error; callers treat that as non-fatal.
pub fn context(
    corpus: &Corpus,
    book: &str,
    chapter: u32,
    verse: u32,
    window: u32,
    confirm: &dyn ConfirmMatch,
) -> Result<Vec<(u32, String)>> {
    let book = resolve_book(corpus, book, confirm)?;
    let chapter_count = book.chapter_count();
    if chapter < 1 || chapter > chapter_count {
        return Err(Error::ChapterOutOfRange {
            book: book.name.clone(),
            chapter,
            max: chapter_count,
        });
    }
    let verses = book.chapter(chapter).ok_or(Error::NotFound)?;
    let max = verses.len() as u32;
    if verse < 1 || verse > max {
        return Err(Error::VerseOutOfRange { book: book.name.clone(), chapter, verse, max });
    }

    let start = verse.saturating_sub(window).max(1);
    let end = verse.saturating_add(window).min(max);
    Ok((start..=end)
        .map(|n| (n, verses[(n - 1) as usize].clone()))
        .collect())
}
