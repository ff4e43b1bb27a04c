//! Whole-card validation tests.
//!
//! These run complete documents through the pipeline and check both the
//! parsed structure and the reported failures and warnings.

use super::fixtures::*;
use crate::rfc::vcard::{
    Card, ContextKey, Diagnostics, ErrorCategory, ErrorKind, ValidationError, WarningKind, parse,
};

fn parse_ok(input: &str) -> (Card, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let card = parse(input, &mut diagnostics).expect("card should validate");
    (card, diagnostics)
}

fn parse_err(input: &str) -> ValidationError {
    parse(input, &mut Diagnostics::new()).expect_err("card should be rejected")
}

#[test_log::test]
fn minimal_card() {
    let (card, diagnostics) = parse_ok(VCARD_MINIMAL);
    assert_eq!(card.properties().len(), 5);
    assert_eq!(card.group(), None);
    assert!(diagnostics.is_empty());
}

#[test]
fn raw_text_round_trips() {
    for input in [VCARD_MINIMAL, VCARD_AUTHOR, VCARD_FULL, VCARD_GROUPED, VCARD_FOLDED] {
        let (card, _) = parse_ok(input);
        assert_eq!(card.to_string(), input);
    }
}

#[test]
fn author_card() {
    let (card, diagnostics) = parse_ok(VCARD_AUTHOR);
    assert_eq!(card.formatted_name(), Some("Frank Dawson"));
    assert_eq!(card.properties_named("TEL").count(), 2);
    assert_eq!(card.properties_named("email").count(), 2);

    let adr = card.first("ADR").expect("ADR present");
    assert_eq!(adr.values.len(), 7);
    assert_eq!(adr.values[6], vec!["U.S.A.".to_string()]);

    assert!(diagnostics.contains(WarningKind::ShortFoldedLine));
    assert!(diagnostics.contains(WarningKind::DefaultTypeValue));
}

#[test]
fn full_card() {
    let (card, diagnostics) = parse_ok(VCARD_FULL);
    assert_eq!(card.formatted_name(), Some("Jane Doe"));
    assert!(diagnostics.is_empty(), "{:?}", diagnostics.warnings());

    let nickname = card.first("NICKNAME").expect("NICKNAME present");
    assert_eq!(nickname.values, vec![vec!["Janie".to_string(), "JD".to_string()]]);

    let geo = card.first("GEO").expect("GEO present");
    assert_eq!(geo.values.len(), 2);

    let extension = card.first("X-ABC-FAVOURITE").expect("extension present");
    assert!(extension.is_extension());
}

#[test]
fn grouped_card() {
    let (card, _) = parse_ok(VCARD_GROUPED);
    assert_eq!(card.group(), Some("item1"));
    assert_eq!(card.properties().len(), 6);
    assert_eq!(card.properties()[0].name, "BEGIN");
    assert_eq!(card.formatted_name(), Some("John Doe"));
}

#[test]
fn missing_group() {
    let err = parse_err(VCARD_MISSING_GROUP);
    assert_eq!(err.kind(), ErrorKind::MissingGroup);
    assert_eq!(err.category(), ErrorCategory::Line);
    assert_eq!(err.get_context(&ContextKey::VCardLine), Some("2"));
}

#[test]
fn mixed_groups() {
    let err = parse_err(VCARD_MIXED_GROUPS);
    assert_eq!(err.kind(), ErrorKind::GroupMismatch);
    assert_eq!(err.detail(), Some("b != a"));
    assert_eq!(err.get_context(&ContextKey::VCardLine), Some("3"));
}

#[test]
fn bad_line_separator() {
    let err = parse_err(VCARD_LF);
    assert_eq!(err.kind(), ErrorKind::InvalidLineSeparator);
    assert_eq!(err.get_context(&ContextKey::FileLine), Some("1"));
}

#[test]
fn folded_lines() {
    let (card, diagnostics) = parse_ok(VCARD_FOLDED);
    assert_eq!(card.formatted_name(), Some("John Doe"));
    assert_eq!(card.first("NOTE").and_then(|p| p.first_value()), Some("firstsecond"));

    let details: Vec<&str> = diagnostics
        .warnings()
        .iter()
        .filter(|w| w.kind == WarningKind::ShortFoldedLine)
        .map(|w| w.detail.as_str())
        .collect();
    assert_eq!(details, vec!["line 4", "line 6"]);
}

#[test]
fn long_line_warns() {
    let input = VCARD_MINIMAL.replace("FN:John Doe", &format!("FN:{}", "a".repeat(80)));
    let (_, diagnostics) = parse_ok(&input);
    assert!(diagnostics.contains(WarningKind::LongLine));
}

#[test]
fn continuation_at_start() {
    let err = parse_err(" BEGIN:VCARD\r\n");
    assert_eq!(err.kind(), ErrorKind::ContinuationAtStart);
}

#[test]
fn wrong_version() {
    let err = parse_err(VCARD_VERSION_4);
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
    assert_eq!(err.get_context(&ContextKey::Property), Some("VERSION"));
    assert_eq!(err.get_context(&ContextKey::VCardLine), Some("2"));
}

#[test]
fn telephone_type_is_strict() {
    let err = parse_err(VCARD_UNKNOWN_TEL_TYPE);
    assert_eq!(err.kind(), ErrorKind::InvalidParamValue);
    assert_eq!(err.get_context(&ContextKey::String), Some("mobile"));
}

#[test]
fn email_type_only_warns() {
    let (_, diagnostics) = parse_ok(VCARD_UNKNOWN_EMAIL_TYPE);
    assert!(diagnostics.contains(WarningKind::InvalidEmailType));
}

#[test]
fn duplicate_parameter_values_merge() {
    let input = VCARD_MINIMAL.replace(
        "END:VCARD",
        "TEL;TYPE=work;TYPE=work,cell:+1-555-0100\r\nEND:VCARD",
    );
    let (card, _) = parse_ok(&input);
    let tel = card.first("TEL").expect("TEL present");
    let types = tel.parameters.get("type").expect("TYPE present");
    assert_eq!(types.len(), 2);
}

#[test]
fn from_str_discards_warnings() {
    let card: Card = VCARD_AUTHOR.parse().expect("card should validate");
    assert_eq!(card.formatted_name(), Some("Frank Dawson"));
}

#[test]
fn error_report_lists_context() {
    let input = VCARD_MINIMAL.replace("END:VCARD", "GEO:north;1.0\r\nEND:VCARD");
    let report = parse_err(&input).to_string();
    let lines: Vec<&str> = report.lines().collect();
    assert!(lines[0].starts_with("Invalid subvalue"));
    assert!(lines.contains(&"vCard line: 5"));
    assert!(lines.contains(&"Property: GEO"));
    assert!(lines.contains(&"Property line: GEO:north;1.0"));
    assert!(lines.contains(&"String: north"));
}
