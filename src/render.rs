//! Terminal rendering helpers for the presentation layer.
//!
//! The core reports unmodified verse text plus match spans; everything
//! visual happens here: brace conversion, word wrapping, span
//! highlighting, and the two-column verse table.

use crossterm::style::Stylize;
use unicode_width::UnicodeWidthStr;

use crate::constants::render::{
    FALLBACK_TERMINAL_WIDTH, MIN_TEXT_WIDTH, REFERENCE_COLUMN_WIDTH,
};

/// Replace translator-annotation braces with parentheses for display.
#[must_use]
pub fn convert_braces(text: &str) -> String {
    text.replace('{', "(").replace('}', ")")
}

/// Wrap text at word boundaries to the given display width.
///
/// Always returns at least one line so table rows stay aligned.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.width() + 1 + word.width() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Apply terminal highlighting to the given byte spans.
///
/// Spans are expected in order and non-overlapping, as the search engine
/// reports them; anything inconsistent is skipped rather than panicking.
#[must_use]
pub fn highlight_spans(text: &str, spans: &[(usize, usize)]) -> String {
    let mut out = String::new();
    let mut cursor = 0;

    for &(start, end) in spans {
        let pieces = (text.get(cursor..start), text.get(start..end));
        let (Some(gap), Some(matched)) = pieces else { continue };
        out.push_str(gap);
        out.push_str(&matched.yellow().to_string());
        cursor = end;
    }
    out.push_str(text.get(cursor..).unwrap_or(""));
    out
}

/// Detected terminal width, with a fallback for non-tty contexts.
#[must_use]
pub fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map_or(FALLBACK_TERMINAL_WIDTH, |(w, _)| usize::from(w))
}

/// Lay out `(reference, text)` rows as a two-column table wrapped to the
/// given total width, with a rule after each row.
#[must_use]
pub fn verse_table(rows: &[(String, String)], total_width: usize) -> String {
    let text_width = total_width
        .saturating_sub(REFERENCE_COLUMN_WIDTH + 3)
        .max(MIN_TEXT_WIDTH);
    let rule_width = REFERENCE_COLUMN_WIDTH + 3 + text_width;
    let mut out = String::new();

    for (reference, text) in rows {
        for (i, line) in wrap(text, text_width).iter().enumerate() {
            let left = if i == 0 { reference.as_str() } else { "" };
            let pad = REFERENCE_COLUMN_WIDTH.saturating_sub(left.width());
            out.push_str(left);
            out.extend(std::iter::repeat(' ').take(pad));
            out.push_str(" | ");
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&"-".repeat(rule_width));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn braces_become_parentheses() {
        assert_eq!(convert_braces("a {note} here"), "a (note) here");
        assert_eq!(convert_braces("plain"), "plain");
    }

    #[test]
    fn wrap_respects_the_width() {
        let text = "one two three four five six seven eight";
        for line in wrap(text, 10) {
            assert!(line.width() <= 10, "line too wide: {line:?}");
        }
        assert_eq!(wrap("short", 80), vec!["short".to_string()]);
        assert_eq!(wrap("", 80), vec![String::new()]);
    }

    #[test]
    fn wrap_rejoins_to_the_original_words() {
        let text = "and God said let there be light";
        let rejoined = wrap(text, 12).join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn highlight_keeps_the_unmatched_text_intact() {
        let text = "let there be light";
        let highlighted = highlight_spans(text, &[(13, 18)]);
        assert!(highlighted.starts_with("let there be "));
        assert!(highlighted.contains("light"));
    }

    #[test]
    fn highlight_skips_inconsistent_spans() {
        let text = "short";
        // Span past the end of the text must not panic or truncate
        assert_eq!(highlight_spans(text, &[(0, 99)]), "short");
        assert_eq!(highlight_spans(text, &[]), "short");
    }

    #[test]
    fn table_rows_carry_the_reference_once() {
        let rows = vec![(
            "Genesis 1:1".to_string(),
            "In the beginning God created the heaven and the earth.".to_string(),
        )];
        let table = verse_table(&rows, 60);
        assert_eq!(table.matches("Genesis 1:1").count(), 1);
        assert!(table.contains(" | "));
        assert!(table.contains('-'));
    }
}
