//! Escape-aware searching and splitting.
//!
//! A character is escaped when it is preceded by an odd number of consecutive
//! escape characters. Escapes are never removed: split parts keep them
//! verbatim so later stages can still validate the escaped grammar.

use super::chars::ESCAPE_CHAR;

/// Returns the byte index of the first unescaped `target` in `text`.
///
/// Uses the backslash as escape character.
#[must_use]
pub fn find_unescaped(text: &str, target: char) -> Option<usize> {
    find_unescaped_with(text, target, ESCAPE_CHAR)
}

/// Returns the byte index of the first `target` in `text` not escaped by `escape`.
#[must_use]
pub fn find_unescaped_with(text: &str, target: char, escape: char) -> Option<usize> {
    scan(text, target, escape, false)
}

/// Like [`find_unescaped`], also skipping over double-quoted runs.
///
/// Used on the name and parameter part of a content line, where a
/// `quoted-string` may contain `:`, `;` and `,`.
#[must_use]
pub fn find_unquoted(text: &str, target: char) -> Option<usize> {
    scan(text, target, ESCAPE_CHAR, true)
}

fn scan(text: &str, target: char, escape: char, quotes: bool) -> Option<usize> {
    let mut escapes = 0usize;
    let mut quoted = false;

    for (index, c) in text.char_indices() {
        let escaped = escapes % 2 == 1;

        if c == target && !escaped && !quoted {
            return Some(index);
        }
        if quotes && c == '"' && !escaped {
            quoted = !quoted;
        }

        if c == escape {
            escapes += 1;
        } else {
            escapes = 0;
        }
    }

    None
}

/// Splits `text` at every unescaped `separator`, using the backslash as escape.
///
/// Always returns at least one part.
#[must_use]
pub fn split_unescaped(text: &str, separator: char) -> Vec<&str> {
    split_unescaped_with(text, separator, ESCAPE_CHAR)
}

/// Splits `text` at every `separator` not escaped by `escape`.
///
/// The separators are removed; escapes inside the parts are kept.
#[must_use]
pub fn split_unescaped_with(text: &str, separator: char, escape: char) -> Vec<&str> {
    split_with(text, separator, |rest| find_unescaped_with(rest, separator, escape))
}

/// Like [`split_unescaped`], never splitting inside a double-quoted run.
#[must_use]
pub fn split_unquoted(text: &str, separator: char) -> Vec<&str> {
    split_with(text, separator, |rest| find_unquoted(rest, separator))
}

fn split_with(text: &str, separator: char, find: impl Fn(&str) -> Option<usize>) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = text;

    while let Some(index) = find(rest) {
        parts.push(&rest[..index]);
        rest = &rest[index + separator.len_utf8()..];
    }

    parts.push(rest);
    parts
}
