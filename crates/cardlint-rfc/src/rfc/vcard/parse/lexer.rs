//! vCard lexer: physical lines, unfolding and groups.
//!
//! Folding follows RFC 2425 §5.8.1: a physical line starting with a single
//! space continues the previous logical line. Unlike a lenient reader this
//! lexer keeps every terminator so that bare `\n` or `\r` endings can be
//! reported instead of silently accepted.

use super::chars::{CRLF, FOLD_CHAR, MAX_LINE_LENGTH_RAW, is_id_char};
use super::diagnostics::{Diagnostics, WarningKind};
use super::error::{ContextKey, ErrorKind, ValidationError, ValidationResult};

/// Splits `text` into physical lines, keeping their terminators.
///
/// A line ends after `\r\n`, a bare `\n` or a bare `\r`. A trailing fragment
/// without terminator is returned as its own line.
#[must_use]
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut index = 0;

    while index < bytes.len() {
        match bytes[index] {
            b'\r' if bytes.get(index + 1) == Some(&b'\n') => {
                lines.push(&text[start..index + 2]);
                index += 2;
                start = index;
            }
            b'\r' | b'\n' => {
                lines.push(&text[start..=index]);
                index += 1;
                start = index;
            }
            _ => index += 1,
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }

    lines
}

/// Returns whether `line` is a bare terminator.
#[must_use]
pub fn is_blank(line: &str) -> bool {
    line == CRLF
}

/// Joins folded physical lines into logical lines.
///
/// Every returned line still ends with CRLF.
///
/// ## Errors
/// Returns `InvalidLineSeparator` for a line not ending in CRLF and
/// `ContinuationAtStart` when the first line is a continuation. Both carry
/// the 1-based physical line as `FileLine`.
pub fn unfold(lines: &[&str], diagnostics: &mut Diagnostics) -> ValidationResult<Vec<String>> {
    let mut logical: Vec<String> = Vec::with_capacity(lines.len());

    for (index, line) in lines.iter().enumerate() {
        let line_number = index + 1;

        if !line.ends_with(CRLF) {
            return Err(
                ValidationError::new(ErrorKind::InvalidLineSeparator)
                    .context(ContextKey::FileLine, line_number),
            );
        }

        if line.chars().count() > MAX_LINE_LENGTH_RAW {
            diagnostics.warn(WarningKind::LongLine, format!("line {line_number}"));
        }

        let Some(continuation) = line.strip_prefix(FOLD_CHAR) else {
            logical.push((*line).to_string());
            continue;
        };

        let Some(previous) = logical.last_mut() else {
            return Err(
                ValidationError::new(ErrorKind::ContinuationAtStart)
                    .context(ContextKey::FileLine, line_number),
            );
        };

        if lines[index - 1].chars().count() < MAX_LINE_LENGTH_RAW {
            diagnostics.warn(WarningKind::ShortFoldedLine, format!("line {}", line_number - 1));
        }
        if continuation == CRLF {
            diagnostics.warn(WarningKind::EmptyFoldedLine, format!("line {line_number}"));
        }

        previous.truncate(previous.len() - CRLF.len());
        previous.push_str(continuation);
    }

    Ok(logical)
}

/// Returns the group prefix of `line`, if it has one.
///
/// A prefix is a run of ID characters followed by a dot. `Some("")` means the
/// line starts with a bare dot.
#[must_use]
pub fn group_prefix(line: &str) -> Option<&str> {
    let end = line
        .char_indices()
        .find(|&(_, c)| !is_id_char(c))
        .map_or(line.len(), |(index, _)| index);

    line[end..].starts_with('.').then_some(&line[..end])
}

/// Determines the group shared by every logical line.
///
/// The first non-blank line decides: with a group prefix, all lines must
/// carry the same one; without, none may carry any.
///
/// ## Errors
/// `DotAtLineStart`, `MissingGroup` or `GroupMismatch`, with the 1-based
/// logical line as `VCardLine`.
pub fn extract_group(lines: &[String]) -> ValidationResult<Option<String>> {
    let mut content = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| !is_blank(line))
        .map(|(index, line)| (index + 1, line.as_str()));

    let Some((first_number, first)) = content.next() else {
        return Ok(None);
    };

    match group_prefix(first) {
        Some("") => Err(
            ValidationError::new(ErrorKind::DotAtLineStart)
                .context(ContextKey::VCardLine, first_number),
        ),
        Some(group) => {
            for (line_number, line) in content {
                match group_prefix(line) {
                    None => {
                        return Err(ValidationError::new(ErrorKind::MissingGroup)
                            .context(ContextKey::VCardLine, line_number));
                    }
                    Some(other) if other != group => {
                        return Err(ValidationError::with_detail(
                            ErrorKind::GroupMismatch,
                            format!("{other} != {group}"),
                        )
                        .context(ContextKey::VCardLine, line_number));
                    }
                    Some(_) => {}
                }
            }
            tracing::trace!(group, "vCard is grouped");
            Ok(Some(group.to_string()))
        }
        None => {
            for (line_number, line) in content {
                if let Some(other) = group_prefix(line) {
                    return Err(ValidationError::with_detail(
                        ErrorKind::GroupMismatch,
                        format!("{other} != (none)"),
                    )
                    .context(ContextKey::VCardLine, line_number));
                }
            }
            Ok(None)
        }
    }
}

/// Removes `group` and its dot from every non-blank line.
///
/// Lines are expected to have passed [`extract_group`]; a line without the
/// prefix is returned unchanged.
#[must_use]
pub fn strip_group<'a>(lines: &'a [String], group: Option<&str>) -> Vec<&'a str> {
    lines
        .iter()
        .map(|line| {
            group
                .and_then(|group| line.strip_prefix(group))
                .and_then(|rest| rest.strip_prefix('.'))
                .unwrap_or(line.as_str())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unfold_text(text: &str) -> (ValidationResult<Vec<String>>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let result = unfold(&split_lines(text), &mut diagnostics);
        (result, diagnostics)
    }

    #[test]
    fn split_keeps_terminators() {
        assert_eq!(
            split_lines("A\r\nB\nC\rD"),
            vec!["A\r\n", "B\n", "C\r", "D"]
        );
    }

    #[test]
    fn split_empty() {
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn unfold_joins_continuations() {
        let (lines, diagnostics) = unfold_text("NOTE:abc\r\n def\r\nFN:x\r\n");
        assert_eq!(lines.unwrap(), vec!["NOTE:abcdef\r\n", "FN:x\r\n"]);
        assert!(diagnostics.contains(WarningKind::ShortFoldedLine));
    }

    #[test]
    fn unfold_rejects_bare_lf() {
        let (result, _) = unfold_text("BEGIN:VCARD\r\nFN:x\nEND:VCARD\r\n");
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLineSeparator);
        assert_eq!(err.get_context(&ContextKey::FileLine), Some("2"));
    }

    #[test]
    fn unfold_rejects_missing_final_terminator() {
        let (result, _) = unfold_text("BEGIN:VCARD\r\nEND:VCARD");
        assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidLineSeparator);
    }

    #[test]
    fn unfold_rejects_leading_continuation() {
        let (result, _) = unfold_text(" BEGIN:VCARD\r\n");
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ContinuationAtStart);
        assert_eq!(err.get_context(&ContextKey::FileLine), Some("1"));
    }

    #[test_log::test]
    fn unfold_warns_on_long_line() {
        let long = format!("NOTE:{}\r\n", "x".repeat(80));
        let (result, diagnostics) = unfold_text(&long);
        assert!(result.is_ok());
        assert!(diagnostics.contains(WarningKind::LongLine));
    }

    #[test]
    fn unfold_full_length_fold_is_quiet() {
        let first = format!("NOTE:{}\r\n", "x".repeat(70));
        assert_eq!(first.chars().count(), MAX_LINE_LENGTH_RAW);
        let text = format!("{first} tail\r\n");
        let (result, diagnostics) = unfold_text(&text);
        assert_eq!(result.unwrap().len(), 1);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn unfold_warns_on_empty_fold() {
        let (result, diagnostics) = unfold_text("NOTE:abc\r\n \r\n");
        assert_eq!(result.unwrap(), vec!["NOTE:abc\r\n"]);
        assert!(diagnostics.contains(WarningKind::EmptyFoldedLine));
        assert!(diagnostics.contains(WarningKind::ShortFoldedLine));
    }

    #[test]
    fn group_prefix_detection() {
        assert_eq!(group_prefix("item1.TEL:1"), Some("item1"));
        assert_eq!(group_prefix(".TEL:1"), Some(""));
        assert_eq!(group_prefix("TEL:1.2"), None);
        assert_eq!(group_prefix("N:Doe.Jr"), None);
    }

    fn owned(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| (*l).to_string()).collect()
    }

    #[test]
    fn extract_shared_group() {
        let lines = owned(&["a.BEGIN:VCARD\r\n", "a.END:VCARD\r\n"]);
        assert_eq!(extract_group(&lines).unwrap(), Some("a".to_string()));
        assert_eq!(
            strip_group(&lines, Some("a")),
            vec!["BEGIN:VCARD\r\n", "END:VCARD\r\n"]
        );
    }

    #[test]
    fn extract_no_group() {
        let lines = owned(&["BEGIN:VCARD\r\n", "URL:http://x.org/\r\n"]);
        assert_eq!(extract_group(&lines).unwrap(), None);
        assert_eq!(strip_group(&lines, None)[1], "URL:http://x.org/\r\n");
    }

    #[test]
    fn extract_skips_blank_lines() {
        let lines = owned(&["a.BEGIN:VCARD\r\n", "a.END:VCARD\r\n", "\r\n"]);
        assert_eq!(extract_group(&lines).unwrap(), Some("a".to_string()));
    }

    #[test]
    fn extract_missing_group() {
        let lines = owned(&["a.BEGIN:VCARD\r\n", "END:VCARD\r\n"]);
        let err = extract_group(&lines).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingGroup);
        assert_eq!(err.get_context(&ContextKey::VCardLine), Some("2"));
    }

    #[test]
    fn extract_group_mismatch() {
        let lines = owned(&["a.BEGIN:VCARD\r\n", "b.END:VCARD\r\n"]);
        let err = extract_group(&lines).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GroupMismatch);
        assert_eq!(err.detail(), Some("b != a"));
    }

    #[test]
    fn extract_unexpected_group() {
        let lines = owned(&["BEGIN:VCARD\r\n", "b.END:VCARD\r\n"]);
        let err = extract_group(&lines).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GroupMismatch);
    }

    #[test]
    fn extract_bare_dot() {
        let lines = owned(&[".BEGIN:VCARD\r\n"]);
        assert_eq!(
            extract_group(&lines).unwrap_err().kind(),
            ErrorKind::DotAtLineStart
        );
    }
}
