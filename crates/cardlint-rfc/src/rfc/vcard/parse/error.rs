//! vCard validation error types.

use std::collections::BTreeMap;
use std::fmt;

/// Result type for vCard validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const SEE_CONTENTLINE: &str = "(See RFC 2426 section 4 for contentline syntax)";
const SEE_TYPES: &str = "(See RFC 2426 section 3 for details)";
const SEE_GRAMMAR: &str = "(See RFC 2426 section 4 for details)";

const CONTINUATION_AT_START: &str = "Continuation line at start of vCard (See RFC 2425 section 5.8.1 for line folding details)";
const INVALID_LINE_SEPARATOR: &str = "Invalid line ending; should be \\r\\n (See RFC 2426 section 2.4.2 for details)";
const DOT_AT_LINE_START: &str = "Dot at start of line without group name (See RFC 2426 section 4 for group syntax)";
const MISSING_GROUP: &str = const_str::concat!("Missing group ", SEE_CONTENTLINE);
const MISMATCH_GROUP: &str = const_str::concat!("Group mismatch ", SEE_CONTENTLINE);

const NON_EMPTY_PARAM: &str = const_str::concat!("Property should not have parameters ", SEE_TYPES);
const INVALID_SUBVALUE_COUNT: &str = const_str::concat!("Invalid subvalue count ", SEE_TYPES);
const INVALID_VALUE_COUNT: &str = const_str::concat!("Invalid value count ", SEE_TYPES);
const MISSING_PARAM: &str = const_str::concat!("Parameter missing ", SEE_TYPES);
const MISSING_PARAM_VALUE: &str = const_str::concat!("Parameter value missing ", SEE_TYPES);
const MISSING_PROPERTY: &str = "Mandatory property missing (See RFC 2426 section 5 for details)";
const MISSING_VALUE_STRING: &str = const_str::concat!("Missing value string ", SEE_CONTENTLINE);

const INVALID_PROPERTY_NAME: &str = "Invalid property name (See RFC 2426 section 4 for name syntax)";
const INVALID_X_NAME: &str = "Invalid X-name (See RFC 2426 section 4 for x-name syntax)";
const INVALID_PARAM_NAME: &str = "Invalid parameter name (See RFC 2426 section 4 for param-name syntax)";

const INVALID_PARAM_VALUE: &str = "Invalid parameter value (See RFC 2426 section 4 for param-value syntax)";
const MISMATCH_PARAM: &str = const_str::concat!("Parameter mismatch ", SEE_TYPES);
const INVALID_DATE: &str = "Invalid date (See RFC 2425 section 5.8.4 for date syntax)";
const INVALID_TIME: &str = "Invalid time (See RFC 2425 section 5.8.4 for time syntax)";
const INVALID_TIME_ZONE: &str = "Invalid time zone (See RFC 2426 section 3.4.1 for time-zone syntax)";
const INVALID_LANGUAGE: &str = "Invalid language (See RFC 1766 section 2 for details)";
const INVALID_SUBVALUE: &str = const_str::concat!("Invalid subvalue ", SEE_TYPES);
const INVALID_TEXT_VALUE: &str = const_str::concat!("Invalid text value ", SEE_GRAMMAR);
const INVALID_URI: &str = "Invalid URI (See RFC 1738 section 5 for genericurl syntax)";
const INVALID_VALUE: &str = const_str::concat!("Invalid value ", SEE_TYPES);

/// The broad class of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The document as a whole is unusable (empty input).
    Document,
    /// Malformed line structure.
    Line,
    /// Malformed identifier.
    Name,
    /// Malformed value content.
    Value,
    /// Wrong number of values, sub-values, parameters or properties.
    ItemCount,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document => write!(f, "document error"),
            Self::Line => write!(f, "line error"),
            Self::Name => write!(f, "name error"),
            Self::Value => write!(f, "value error"),
            Self::ItemCount => write!(f, "item count error"),
        }
    }
}

/// The specific kind of validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input text is empty.
    EmptyVCard,
    /// A line does not end with CRLF.
    InvalidLineSeparator,
    /// The first line is a folded continuation.
    ContinuationAtStart,
    /// The first line starts with a dot but no group name.
    DotAtLineStart,
    /// A grouped vCard has a line without the group.
    MissingGroup,
    /// A line carries a different group than the first line.
    GroupMismatch,
    /// Property parameters where none are allowed.
    NonEmptyParam,
    /// Wrong number of comma-separated sub-values.
    InvalidSubvalueCount,
    /// Wrong number of semicolon-separated values.
    InvalidValueCount,
    /// A required parameter is absent.
    MissingParam,
    /// A parameter has no `=` and value list.
    MissingParamValue,
    /// A mandatory property is absent.
    MissingProperty,
    /// A line has no unescaped colon.
    MissingValueString,
    /// A parameter combination that is not allowed together.
    MismatchParam,
    /// Unknown property name.
    InvalidPropertyName,
    /// Malformed extension name.
    InvalidXName,
    /// Malformed or disallowed parameter name.
    InvalidParamName,
    /// Malformed or disallowed parameter value.
    InvalidParamValue,
    /// Malformed date.
    InvalidDate,
    /// Malformed time.
    InvalidTime,
    /// Malformed UTC offset.
    InvalidTimeZone,
    /// Malformed language tag.
    InvalidLanguage,
    /// A sub-value with characters outside its grammar.
    InvalidSubvalue,
    /// A value violating the `text-value` grammar.
    InvalidTextValue,
    /// Malformed URI.
    InvalidUri,
    /// A value that is not one of the accepted literals.
    InvalidValue,
}

impl ErrorKind {
    /// Returns the category this kind belongs to.
    #[must_use]
    pub const fn category(self) -> ErrorCategory {
        match self {
            Self::EmptyVCard => ErrorCategory::Document,
            Self::InvalidLineSeparator
            | Self::ContinuationAtStart
            | Self::DotAtLineStart
            | Self::MissingGroup => ErrorCategory::Line,
            Self::GroupMismatch
            | Self::InvalidPropertyName
            | Self::InvalidXName
            | Self::InvalidParamName => ErrorCategory::Name,
            Self::NonEmptyParam
            | Self::InvalidSubvalueCount
            | Self::InvalidValueCount
            | Self::MissingParam
            | Self::MissingParamValue
            | Self::MissingProperty
            | Self::MissingValueString
            | Self::MismatchParam => ErrorCategory::ItemCount,
            Self::InvalidParamValue
            | Self::InvalidDate
            | Self::InvalidTime
            | Self::InvalidTimeZone
            | Self::InvalidLanguage
            | Self::InvalidSubvalue
            | Self::InvalidTextValue
            | Self::InvalidUri
            | Self::InvalidValue => ErrorCategory::Value,
        }
    }

    /// Returns the human-readable message for this kind.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::EmptyVCard => "vCard is empty",
            Self::InvalidLineSeparator => INVALID_LINE_SEPARATOR,
            Self::ContinuationAtStart => CONTINUATION_AT_START,
            Self::DotAtLineStart => DOT_AT_LINE_START,
            Self::MissingGroup => MISSING_GROUP,
            Self::GroupMismatch => MISMATCH_GROUP,
            Self::NonEmptyParam => NON_EMPTY_PARAM,
            Self::InvalidSubvalueCount => INVALID_SUBVALUE_COUNT,
            Self::InvalidValueCount => INVALID_VALUE_COUNT,
            Self::MissingParam => MISSING_PARAM,
            Self::MissingParamValue => MISSING_PARAM_VALUE,
            Self::MissingProperty => MISSING_PROPERTY,
            Self::MissingValueString => MISSING_VALUE_STRING,
            Self::MismatchParam => MISMATCH_PARAM,
            Self::InvalidPropertyName => INVALID_PROPERTY_NAME,
            Self::InvalidXName => INVALID_X_NAME,
            Self::InvalidParamName => INVALID_PARAM_NAME,
            Self::InvalidParamValue => INVALID_PARAM_VALUE,
            Self::InvalidDate => INVALID_DATE,
            Self::InvalidTime => INVALID_TIME,
            Self::InvalidTimeZone => INVALID_TIME_ZONE,
            Self::InvalidLanguage => INVALID_LANGUAGE,
            Self::InvalidSubvalue => INVALID_SUBVALUE,
            Self::InvalidTextValue => INVALID_TEXT_VALUE,
            Self::InvalidUri => INVALID_URI,
            Self::InvalidValue => INVALID_VALUE,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Keys of the diagnostic context attached to an error.
///
/// The derived ordering is the display order: the well-known keys first, in
/// declaration order, then any [`ContextKey::Other`] keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContextKey {
    /// Path of the file the vCard came from.
    File,
    /// 1-based physical line number.
    FileLine,
    /// 1-based logical (unfolded) line number within the vCard.
    VCardLine,
    /// Uppercased property name.
    Property,
    /// The unfolded property line, without terminator.
    PropertyLine,
    /// The offending string.
    String,
    /// Any other key.
    Other(String),
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("File"),
            Self::FileLine => f.write_str("File line"),
            Self::VCardLine => f.write_str("vCard line"),
            Self::Property => f.write_str("Property"),
            Self::PropertyLine => f.write_str("Property line"),
            Self::String => f.write_str("String"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// A validation failure with its accumulated diagnostic context.
///
/// Each pipeline stage adds its own context on the way out, so the error
/// reaching the caller carries the full trail from offending string up to
/// the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    kind: ErrorKind,
    detail: Option<String>,
    context: BTreeMap<ContextKey, String>,
}

impl ValidationError {
    /// Creates an error without detail or context.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            detail: None,
            context: BTreeMap::new(),
        }
    }

    /// Creates an error with a detail appended to the message.
    #[must_use]
    pub fn with_detail(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: Some(detail.into()),
            context: BTreeMap::new(),
        }
    }

    /// Creates an error whose `String` context is the offending text.
    #[must_use]
    pub fn for_string(kind: ErrorKind, offending: &str) -> Self {
        Self::new(kind).context(ContextKey::String, offending)
    }

    /// Adds a context entry, replacing any earlier value for the same key.
    #[must_use]
    pub fn context(mut self, key: ContextKey, value: impl fmt::Display) -> Self {
        self.add_context(key, value);
        self
    }

    /// Adds a context entry in place.
    pub fn add_context(&mut self, key: ContextKey, value: impl fmt::Display) {
        self.context.insert(key, value.to_string());
    }

    /// The specific kind of failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The broad class of failure.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Extra detail appended to the message, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// The first line of the report: message plus detail.
    #[must_use]
    pub fn message(&self) -> String {
        match &self.detail {
            Some(detail) => format!("{}: {detail}", self.kind),
            None => self.kind.message().to_string(),
        }
    }

    /// Returns the context value for `key`.
    #[must_use]
    pub fn get_context(&self, key: &ContextKey) -> Option<&str> {
        self.context.get(key).map(String::as_str)
    }

    /// Iterates over the context in display order.
    pub fn context_entries(&self) -> impl Iterator<Item = (&ContextKey, &str)> {
        self.context.iter().map(|(key, value)| (key, value.as_str()))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())?;
        for (key, value) in &self.context {
            write!(f, "\n{key}: {value}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl From<ErrorKind> for ValidationError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}
