//! vCard 3.0 validation (RFC 2426, on the RFC 2425 directory profile).
//!
//! ## Overview
//!
//! A card is unfolded into logical lines, checked for a consistent group
//! prefix, tokenized property by property and validated against the
//! per-property rules. Hard failures end the parse with a
//! [`ValidationError`]; soft problems are collected as warnings in
//! [`Diagnostics`].
//!
//! ## Usage
//!
//! ```rust
//! use cardlint_rfc::rfc::vcard::{Card, Diagnostics, ErrorKind, parse};
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! VERSION:3.0\r\n\
//! N:Doe;John;;;\r\n\
//! FN:John Doe\r\n\
//! EMAIL;TYPE=internet,pref:john@example.com\r\n\
//! END:VCARD\r\n";
//!
//! let card = parse(input, &mut Diagnostics::new()).unwrap();
//! assert_eq!(card.formatted_name(), Some("John Doe"));
//! assert_eq!(card.to_string(), input);
//!
//! let err = "BEGIN:VCARD\r\nEND:VCARD\r\n".parse::<Card>().unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::MissingProperty);
//! ```
//!
//! ## Submodules
//!
//! - [`core`] - Parsed types (`Card`, `Property`, `Parameters`)
//! - [`parse`] - Pipeline stages, rules and error types

pub mod core;
pub mod parse;

#[cfg(test)]
mod tests;

pub use core::{Card, Parameters, Property};
pub use parse::{
    ContextKey, Diagnostics, ErrorCategory, ErrorKind, ValidationError, ValidationResult,
    Warning, WarningKind, parse, parse_property,
};
