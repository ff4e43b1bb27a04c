//! Validation of whole files holding any number of vCards.
//!
//! A file is read as a stream of physical lines. Each vCard ends at a line
//! holding only `\r\n`, and is validated with that line included. The first
//! invalid card stops the file.

use std::fmt;
use std::io::Read;
use std::path::Path;

use cardlint_rfc::rfc::vcard::parse::{is_blank, split_lines};
use cardlint_rfc::rfc::vcard::{Card, ContextKey, Diagnostics, ValidationError, Warning, parse};

use crate::error::{AppError, AppResult};

/// Source name that reads standard input.
pub const STDIN: &str = "-";

/// A warning raised by one card of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardWarning {
    /// 1-based file line the card starts on.
    pub line: usize,
    pub warning: Warning,
}

/// Outcome of validating one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub source: String,
    /// Every card that validated, in file order.
    pub cards: Vec<Card>,
    pub warnings: Vec<CardWarning>,
    /// The first failure, with `File` and `File line` context.
    pub error: Option<ValidationError>,
    /// Lines after the last card separator that were never validated.
    pub remaining_lines: usize,
}

impl FileReport {
    fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            cards: Vec::new(),
            warnings: Vec::new(),
            error: None,
            remaining_lines: 0,
        }
    }

    /// Whether every line of the file belonged to a valid card.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.error.is_none() && self.remaining_lines == 0
    }

    fn collect_warnings(&mut self, line: usize, diagnostics: Diagnostics) {
        self.warnings.extend(
            diagnostics
                .into_iter()
                .map(|warning| CardWarning { line, warning }),
        );
    }
}

/// Writes the failure, if any: the error report, or the unprocessed tail.
impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error) = &self.error {
            write!(f, "{error}")
        } else if self.remaining_lines > 0 {
            write!(
                f,
                "Could not process entire {} - {} lines remain",
                self.source, self.remaining_lines
            )
        } else {
            Ok(())
        }
    }
}

/// Validates every vCard in `text`, naming it `source` in reports.
#[must_use]
#[tracing::instrument(skip(text), fields(len = text.len()))]
pub fn validate_text(source: &str, text: &str) -> FileReport {
    let mut report = FileReport::new(source);
    let mut card_text = String::new();
    let mut card_start = 1;

    for (index, line) in split_lines(text).into_iter().enumerate() {
        card_text.push_str(line);
        if !is_blank(line) {
            continue;
        }

        let line_number = index + 1;
        let mut diagnostics = Diagnostics::new();
        match parse(&card_text, &mut diagnostics) {
            Ok(card) => {
                report.collect_warnings(card_start, diagnostics);
                report.cards.push(card);
                card_text.clear();
                card_start = line_number + 1;
            }
            Err(error) => {
                report.collect_warnings(card_start, diagnostics);
                report.error = Some(locate(error, source, card_start, line_number));
                return report;
            }
        }
    }

    if !card_text.is_empty() {
        report.remaining_lines = split_lines(&card_text).len();
    }

    tracing::debug!(
        cards = report.cards.len(),
        warnings = report.warnings.len(),
        remaining = report.remaining_lines,
        "file validated"
    );

    report
}

/// Adds the file name and an absolute file line to a card's error.
///
/// An error located by the unfolder carries a physical line relative to
/// the card; any other error is pinned to the card's separator line.
fn locate(
    error: ValidationError,
    source: &str,
    card_start: usize,
    separator_line: usize,
) -> ValidationError {
    let file_line = error
        .get_context(&ContextKey::FileLine)
        .and_then(|line| line.parse::<usize>().ok())
        .map_or(separator_line, |line| card_start + line - 1);

    error
        .context(ContextKey::File, source)
        .context(ContextKey::FileLine, file_line)
}

/// Reads and validates `path`; `-` reads standard input.
///
/// ## Errors
/// `AppError::Io` if the source cannot be read as UTF-8 text.
pub fn validate_path(path: &str) -> AppResult<FileReport> {
    let text = if path == STDIN {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| AppError::Io {
                path: path.into(),
                source,
            })?;
        text
    } else {
        std::fs::read_to_string(Path::new(path)).map_err(|source| AppError::Io {
            path: path.into(),
            source,
        })?
    };

    Ok(validate_text(path, &text))
}
