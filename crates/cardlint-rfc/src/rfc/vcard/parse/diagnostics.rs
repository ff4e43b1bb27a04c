//! Non-fatal diagnostics collected while validating a vCard.

use std::fmt;

/// The kind of a non-fatal diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// A physical line longer than the folding limit.
    LongLine,
    /// A line that was folded before reaching the folding limit.
    ShortFoldedLine,
    /// A continuation line with no content.
    EmptyFoldedLine,
    /// A well-formed date that is probably wrong.
    InvalidDate,
    /// An EMAIL `TYPE` outside the registered set.
    InvalidEmailType,
    /// An N component containing a space.
    SplitName,
    /// A `TYPE` parameter spelling out the RFC default.
    DefaultTypeValue,
}

impl WarningKind {
    /// Returns the human-readable message for this kind.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::LongLine => "Long line in vCard",
            Self::ShortFoldedLine => "Short folded line",
            Self::EmptyFoldedLine => "Empty folded line",
            Self::InvalidDate => "Possible invalid date",
            Self::InvalidEmailType => "Possible invalid email TYPE",
            Self::SplitName => "Possible split name (replace space with comma)",
            Self::DefaultTypeValue => "Using default TYPE value; can be removed",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A single non-fatal diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub detail: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.detail)
    }
}

/// Collector for warnings raised by the pipeline.
///
/// Passed by mutable reference through every stage; the outcome of a parse
/// never depends on what was collected here.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning.
    pub fn warn(&mut self, kind: WarningKind, detail: impl Into<String>) {
        let detail = detail.into();
        tracing::debug!(kind = ?kind, %detail, "vCard warning");
        self.warnings.push(Warning { kind, detail });
    }

    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// Returns whether a warning of `kind` was recorded.
    #[must_use]
    pub fn contains(&self, kind: WarningKind) -> bool {
        self.warnings.iter().any(|w| w.kind == kind)
    }

    /// Takes the collected warnings, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }
}

impl IntoIterator for Diagnostics {
    type Item = Warning;
    type IntoIter = std::vec::IntoIter<Warning>;

    fn into_iter(self) -> Self::IntoIter {
        self.warnings.into_iter()
    }
}
