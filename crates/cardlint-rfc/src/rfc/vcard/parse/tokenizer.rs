//! Property tokenizer (RFC 2426 §4 `contentline`).
//!
//! Turns one unfolded, group-stripped line into a [`Property`] and runs the
//! per-property rules on it.

use super::chars::{CRLF, is_id, is_value_char};
use super::diagnostics::Diagnostics;
use super::error::{ContextKey, ErrorKind, ValidationError, ValidationResult};
use super::escape::{find_unescaped, find_unquoted, split_unescaped, split_unquoted};
use super::rules::validate_property;
use super::values::validate_param_value;
use crate::rfc::vcard::core::{Parameters, Property, names};

/// Tokenizes and validates a single property line, terminator included.
///
/// ## Errors
/// `MissingValueString` when the line has no unescaped colon. Every later
/// failure carries the line (without terminator) as `PropertyLine`.
pub fn parse_property(line: &str, diagnostics: &mut Diagnostics) -> ValidationResult<Property> {
    // An unbalanced quote hides every later colon from the quote-aware scan.
    let colon = find_unquoted(line, ':')
        .or_else(|| find_unescaped(line, ':'))
        .ok_or_else(|| {
            ValidationError::with_detail(ErrorKind::MissingValueString, line.trim_end_matches(CRLF))
        })?;

    tokenize(&line[..colon], &line[colon + 1..])
        .and_then(|property| {
            validate_property(&property, diagnostics)?;
            Ok(property)
        })
        .map_err(|error| error.context(ContextKey::PropertyLine, line.trim_end_matches(CRLF)))
}

fn tokenize(head: &str, value_string: &str) -> ValidationResult<Property> {
    let mut parts = split_unquoted(head, ';').into_iter();
    let name = parts.next().unwrap_or_default();

    if !is_property_name(name) {
        return Err(ValidationError::with_detail(ErrorKind::InvalidPropertyName, name));
    }

    let mut parameters = Parameters::new();
    for parameter in parts {
        let (param_name, values) = parse_parameter(parameter)?;
        parameters.insert(param_name, values);
    }

    let raw_value = value_string.strip_suffix(CRLF).unwrap_or(value_string);
    let values = parse_values(raw_value)?;

    tracing::trace!(property = name, values = values.len(), "tokenized property");

    Ok(Property::new(name, values, raw_value).with_parameters(parameters))
}

/// Registered names, or `X-` plus ID characters with any case of `X`.
fn is_property_name(name: &str) -> bool {
    if names::is_known(name) {
        return true;
    }

    name.get(..2)
        .zip(name.get(2..))
        .is_some_and(|(prefix, rest)| prefix.eq_ignore_ascii_case("X-") && is_id(rest))
}

fn parse_parameter(parameter: &str) -> ValidationResult<(&str, Vec<&str>)> {
    let Some(equals) = find_unescaped(parameter, '=') else {
        return Err(ValidationError::with_detail(ErrorKind::MissingParamValue, parameter));
    };

    let name = &parameter[..equals];
    if !is_id(name) {
        return Err(ValidationError::with_detail(ErrorKind::InvalidParamName, name));
    }

    let values = split_unquoted(&parameter[equals + 1..], ',');
    for value in &values {
        if value.is_empty() {
            return Err(ValidationError::for_string(ErrorKind::InvalidParamValue, value));
        }
        validate_param_value(value)?;
    }

    Ok((name, values))
}

fn parse_values(raw_value: &str) -> ValidationResult<Vec<Vec<String>>> {
    split_unescaped(raw_value, ';')
        .into_iter()
        .map(|value| {
            split_unescaped(value, ',')
                .into_iter()
                .map(|sub_value| {
                    if sub_value.chars().all(is_value_char) {
                        Ok(sub_value.to_string())
                    } else {
                        Err(ValidationError::for_string(ErrorKind::InvalidSubvalue, sub_value))
                    }
                })
                .collect()
        })
        .collect()
}
