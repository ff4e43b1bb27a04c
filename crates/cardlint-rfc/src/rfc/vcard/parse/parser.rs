//! vCard document parser.

use super::diagnostics::Diagnostics;
use super::error::{ContextKey, ErrorKind, ValidationError, ValidationResult};
use super::lexer::{extract_group, is_blank, split_lines, strip_group, unfold};
use super::tokenizer::parse_property;
use crate::rfc::vcard::core::{Card, Property, names};

/// Parses and validates a single vCard.
///
/// Stages run in order (unfold, group, tokenize and validate each property,
/// mandatory properties) and the first failure ends the parse. Warnings go
/// to `diagnostics` and never change the outcome.
///
/// ## Errors
/// `EmptyVCard` for empty input; otherwise the first failure of any stage,
/// with the 1-based logical line as `VCardLine` once properties are parsed.
#[tracing::instrument(skip_all, fields(len = text.len()))]
pub fn parse(text: &str, diagnostics: &mut Diagnostics) -> ValidationResult<Card> {
    if text.is_empty() {
        return Err(ValidationError::new(ErrorKind::EmptyVCard)
            .context(ContextKey::VCardLine, 1)
            .context(ContextKey::FileLine, 1));
    }

    let physical = split_lines(text);
    let logical = unfold(&physical, diagnostics)?;
    let group = extract_group(&logical)?;
    let lines = strip_group(&logical, group.as_deref());

    let mut properties = Vec::with_capacity(lines.len());
    for (index, line) in lines.into_iter().enumerate() {
        if is_blank(line) {
            continue;
        }
        let property = parse_property(line, diagnostics)
            .map_err(|error| error.context(ContextKey::VCardLine, index + 1))?;
        properties.push(property);
    }

    check_mandatory(&properties)?;

    tracing::debug!(
        properties = properties.len(),
        warnings = diagnostics.len(),
        "vCard parsed"
    );

    Ok(Card::new(text.to_string(), group, properties))
}

fn check_mandatory(properties: &[Property]) -> ValidationResult<()> {
    for name in names::MANDATORY {
        if !properties.iter().any(|prop| prop.is(name)) {
            return Err(ValidationError::with_detail(ErrorKind::MissingProperty, name)
                .context(ContextKey::Property, name));
        }
    }
    Ok(())
}
