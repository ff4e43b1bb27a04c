//! vCard parsing and validation (RFC 2426).
//!
//! ## Usage
//!
//! ```rust
//! use cardlint_rfc::rfc::vcard::parse::{Diagnostics, parse};
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! VERSION:3.0\r\n\
//! N:Doe;John;;;\r\n\
//! FN:John Doe\r\n\
//! TEL;TYPE=voice:+1-555-0100\r\n\
//! END:VCARD\r\n";
//!
//! let mut diagnostics = Diagnostics::new();
//! let card = parse(input, &mut diagnostics).unwrap();
//! assert_eq!(card.formatted_name(), Some("John Doe"));
//! assert_eq!(diagnostics.len(), 1); // TYPE=voice is the default
//! ```
//!
//! ## Pipeline
//!
//! - [`split_lines`] / [`unfold`] - physical lines to logical lines
//! - [`extract_group`] / [`strip_group`] - the optional shared `group.` prefix
//! - [`parse_property`] - tokenizing one line and applying its rule
//! - [`parse`] - the whole card, including mandatory properties

mod chars;
mod diagnostics;
mod error;
mod escape;
mod lexer;
mod parser;
mod rules;
mod tokenizer;
mod values;


pub use chars::{
    CRLF, MAX_LINE_LENGTH, MAX_LINE_LENGTH_RAW, is_id, is_qsafe_char, is_safe_char,
    is_value_char,
};
pub use diagnostics::{Diagnostics, Warning, WarningKind};
pub use error::{ContextKey, ErrorCategory, ErrorKind, ValidationError, ValidationResult};
pub use escape::{
    find_unescaped, find_unescaped_with, find_unquoted, split_unescaped, split_unescaped_with,
    split_unquoted,
};
pub use lexer::{extract_group, group_prefix, is_blank, split_lines, strip_group, unfold};
pub use parser::parse;
pub use rules::{
    ADDRESS_TYPES, EMAIL_TYPES, OtherParameters, ParameterRule, PropertyCheck, PropertyRule,
    SubValueCount, TELEPHONE_TYPES, TypeRule, UnknownType, ValueCheck, ValueRule, rule_for,
    rules, validate_property,
};
pub use tokenizer::parse_property;
pub use values::{
    validate_date, validate_date_or_date_time, validate_float, validate_language_tag,
    validate_param_value, validate_ptext, validate_quoted_string, validate_text_parameter,
    validate_text_value, validate_time, validate_time_zone, validate_uri, validate_x_name,
};
