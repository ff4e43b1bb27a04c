//! Per-property validation rules (RFC 2426 §2.1 and §3).
//!
//! Each registered property with constraints has one [`PropertyRule`] in a
//! static table. A rule is checked in a fixed order: parameters, value
//! count, sub-value count, then the value itself. Properties without a rule,
//! including every `X-` property, only get the tokenizer's checks.

use std::collections::BTreeSet;

use chrono::Utc;

use super::diagnostics::{Diagnostics, WarningKind};
use super::error::{ContextKey, ErrorKind, ValidationError, ValidationResult};
use super::values::{
    join_values, validate_date_or_date_time, validate_float, validate_text_parameter,
    validate_text_value, validate_time_zone, validate_uri,
};
use crate::rfc::vcard::core::{Property, is_only, names};

/// A check on a single sub-value.
pub type ValueCheck = fn(&str) -> ValidationResult<()>;

/// A check with access to the whole property.
pub type PropertyCheck = fn(&Property, &mut Diagnostics) -> ValidationResult<()>;

/// `TYPE` values for ADR and LABEL (RFC 2426 §3.2.1).
pub const ADDRESS_TYPES: &[&str] = &["dom", "intl", "postal", "parcel", "home", "work", "pref"];
const ADDRESS_DEFAULT: &[&str] = &["intl", "postal", "parcel", "work"];

/// `TYPE` values for TEL (RFC 2426 §3.3.1).
pub const TELEPHONE_TYPES: &[&str] = &[
    "home", "msg", "work", "pref", "voice", "fax", "cell", "video", "pager", "bbs", "modem",
    "car", "isdn", "pcs",
];
const TELEPHONE_DEFAULT: &[&str] = &["voice"];

/// `TYPE` values for EMAIL (RFC 2426 §3.3.2).
pub const EMAIL_TYPES: &[&str] = &[
    "internet", "x400", "pref", "dom", "intl", "postal", "parcel", "home", "work",
];
const EMAIL_DEFAULT: &[&str] = &["internet"];

/// Required number of sub-values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubValueCount {
    Any,
    /// The first value must have exactly this many sub-values.
    First(usize),
    /// Every value must have exactly this many sub-values.
    Each(usize),
}

/// What to do with a `TYPE` value outside the allowed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownType {
    /// Fail with `InvalidParamValue`.
    Reject,
    /// Record a "possible invalid email TYPE" warning.
    Warn,
}

/// How parameters other than `TYPE` are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtherParameters {
    /// Must be a valid `text-param`.
    TextParam,
    /// Fail with `InvalidParamName`.
    Reject,
}

/// Constraints on a `TYPE` parameter.
#[derive(Debug, Clone, Copy)]
pub struct TypeRule {
    pub allowed: &'static [&'static str],
    pub unknown: UnknownType,
    /// The RFC default set; spelling it out earns a warning.
    pub default: &'static [&'static str],
    pub others: OtherParameters,
}

/// Constraints on a property's parameters.
#[derive(Clone, Copy)]
pub enum ParameterRule {
    Unchecked,
    /// No parameters allowed.
    Forbidden,
    /// Every parameter must be a `text-param`.
    Text,
    Type(TypeRule),
    Custom(PropertyCheck),
}

/// Constraints on a property's value.
#[derive(Clone, Copy)]
pub enum ValueRule {
    Unchecked,
    /// The first sub-value must equal this, ignoring ASCII case.
    Literal(&'static str),
    /// Check the first sub-value.
    First(ValueCheck),
    /// Check every sub-value.
    Every(ValueCheck),
    Custom(PropertyCheck),
}

/// The full rule for one property name.
#[derive(Clone, Copy)]
pub struct PropertyRule {
    pub name: &'static str,
    pub parameters: ParameterRule,
    pub value_count: Option<usize>,
    pub sub_value_count: SubValueCount,
    pub value: ValueRule,
}

const fn rule(
    name: &'static str,
    parameters: ParameterRule,
    value_count: Option<usize>,
    sub_value_count: SubValueCount,
    value: ValueRule,
) -> PropertyRule {
    PropertyRule {
        name,
        parameters,
        value_count,
        sub_value_count,
        value,
    }
}

const ADDRESS_TYPE_RULE: TypeRule = TypeRule {
    allowed: ADDRESS_TYPES,
    unknown: UnknownType::Reject,
    default: ADDRESS_DEFAULT,
    others: OtherParameters::TextParam,
};

#[rustfmt::skip]
static RULES: &[PropertyRule] = &[
    rule(names::BEGIN, ParameterRule::Forbidden, Some(1), SubValueCount::First(1), ValueRule::Literal("VCARD")),
    rule(names::END, ParameterRule::Forbidden, Some(1), SubValueCount::First(1), ValueRule::Literal("VCARD")),
    rule(names::NAME, ParameterRule::Forbidden, Some(1), SubValueCount::First(1), ValueRule::First(validate_text_value)),
    rule(names::PROFILE, ParameterRule::Forbidden, Some(1), SubValueCount::First(1), ValueRule::Literal("VCARD")),
    rule(names::SOURCE, ParameterRule::Custom(check_source_parameters), None, SubValueCount::Any, ValueRule::Unchecked),
    rule(names::VERSION, ParameterRule::Forbidden, Some(1), SubValueCount::Any, ValueRule::Literal("3.0")),
    rule(names::FN, ParameterRule::Text, Some(1), SubValueCount::First(1), ValueRule::First(validate_text_value)),
    rule(names::N, ParameterRule::Text, Some(5), SubValueCount::Any, ValueRule::Custom(check_name)),
    rule(names::NICKNAME, ParameterRule::Text, Some(1), SubValueCount::Any, ValueRule::Unchecked),
    rule(names::PHOTO, ParameterRule::Custom(check_media_parameters), Some(1), SubValueCount::First(1), ValueRule::Custom(check_media_value)),
    rule(names::LOGO, ParameterRule::Custom(check_media_parameters), Some(1), SubValueCount::First(1), ValueRule::Custom(check_media_value)),
    rule(names::BDAY, ParameterRule::Forbidden, Some(1), SubValueCount::First(1), ValueRule::Custom(check_birthday)),
    rule(names::ADR, ParameterRule::Type(ADDRESS_TYPE_RULE), Some(7), SubValueCount::Any, ValueRule::Unchecked),
    rule(names::LABEL, ParameterRule::Type(ADDRESS_TYPE_RULE), Some(1), SubValueCount::First(1), ValueRule::First(validate_text_value)),
    rule(
        names::TEL,
        ParameterRule::Type(TypeRule {
            allowed: TELEPHONE_TYPES,
            unknown: UnknownType::Reject,
            default: TELEPHONE_DEFAULT,
            others: OtherParameters::Reject,
        }),
        Some(1),
        SubValueCount::First(1),
        ValueRule::Unchecked,
    ),
    rule(
        names::EMAIL,
        ParameterRule::Type(TypeRule {
            allowed: EMAIL_TYPES,
            unknown: UnknownType::Warn,
            default: EMAIL_DEFAULT,
            others: OtherParameters::Reject,
        }),
        Some(1),
        SubValueCount::First(1),
        ValueRule::First(validate_text_value),
    ),
    rule(names::MAILER, ParameterRule::Text, Some(1), SubValueCount::First(1), ValueRule::First(validate_text_value)),
    rule(names::TZ, ParameterRule::Forbidden, Some(1), SubValueCount::First(1), ValueRule::First(check_time_zone)),
    rule(names::GEO, ParameterRule::Forbidden, Some(2), SubValueCount::Each(1), ValueRule::Every(validate_float)),
    rule(names::TITLE, ParameterRule::Text, Some(1), SubValueCount::First(1), ValueRule::First(validate_text_value)),
    rule(names::ROLE, ParameterRule::Text, Some(1), SubValueCount::First(1), ValueRule::First(validate_text_value)),
    rule(names::AGENT, ParameterRule::Unchecked, None, SubValueCount::Any, ValueRule::Custom(check_agent)),
    rule(names::URL, ParameterRule::Forbidden, Some(1), SubValueCount::Any, ValueRule::First(validate_uri)),
];

/// Returns the rule table.
#[must_use]
pub fn rules() -> &'static [PropertyRule] {
    RULES
}

/// Looks up the rule for `name` (case-insensitive).
#[must_use]
pub fn rule_for(name: &str) -> Option<&'static PropertyRule> {
    RULES.iter().find(|rule| rule.name.eq_ignore_ascii_case(name))
}

/// Validates `property` against its rule, if it has one.
///
/// ## Errors
/// The first violated constraint, with the uppercased property name as
/// `Property` context.
pub fn validate_property(property: &Property, diagnostics: &mut Diagnostics) -> ValidationResult<()> {
    let Some(rule) = rule_for(&property.name) else {
        return Ok(());
    };

    rule.check(property, diagnostics)
        .map_err(|error| error.context(ContextKey::Property, property.upper_name()))
}

fn expect_count(kind: ErrorKind, actual: usize, expected: usize) -> ValidationResult<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(ValidationError::with_detail(
            kind,
            format!("{actual} (expected {expected})"),
        ))
    }
}

impl PropertyRule {
    /// Checks `property` against this rule.
    ///
    /// ## Errors
    /// The first violated constraint.
    pub fn check(&self, property: &Property, diagnostics: &mut Diagnostics) -> ValidationResult<()> {
        self.parameters.check(property, diagnostics)?;

        if let Some(expected) = self.value_count {
            expect_count(ErrorKind::InvalidValueCount, property.values.len(), expected)?;
        }

        self.sub_value_count.check(&property.values)?;
        self.value.check(property, diagnostics)
    }
}

impl SubValueCount {
    fn check(self, values: &[Vec<String>]) -> ValidationResult<()> {
        match self {
            Self::Any => Ok(()),
            Self::First(expected) => expect_count(
                ErrorKind::InvalidSubvalueCount,
                values.first().map_or(0, Vec::len),
                expected,
            ),
            Self::Each(expected) => values.iter().try_for_each(|value| {
                expect_count(ErrorKind::InvalidSubvalueCount, value.len(), expected)
            }),
        }
    }
}

impl ParameterRule {
    fn check(self, property: &Property, diagnostics: &mut Diagnostics) -> ValidationResult<()> {
        match self {
            Self::Unchecked => Ok(()),
            Self::Forbidden if property.parameters.is_empty() => Ok(()),
            Self::Forbidden => Err(ValidationError::with_detail(
                ErrorKind::NonEmptyParam,
                property.parameters.to_string(),
            )),
            Self::Text => property
                .parameters
                .iter()
                .try_for_each(|(name, values)| validate_text_parameter(name, values)),
            Self::Type(rule) => rule.check(property, diagnostics),
            Self::Custom(check) => check(property, diagnostics),
        }
    }
}

impl TypeRule {
    fn check(&self, property: &Property, diagnostics: &mut Diagnostics) -> ValidationResult<()> {
        for (name, values) in &property.parameters {
            if name != "TYPE" {
                match self.others {
                    OtherParameters::TextParam => validate_text_parameter(name, values)?,
                    OtherParameters::Reject => {
                        return Err(ValidationError::with_detail(
                            ErrorKind::InvalidParamName,
                            name.as_str(),
                        ));
                    }
                }
                continue;
            }

            for value in values {
                if self.allowed.iter().any(|allowed| allowed.eq_ignore_ascii_case(value)) {
                    continue;
                }
                match self.unknown {
                    UnknownType::Reject => {
                        return Err(ValidationError::for_string(
                            ErrorKind::InvalidParamValue,
                            value,
                        ));
                    }
                    UnknownType::Warn => diagnostics.warn(WarningKind::InvalidEmailType, value.as_str()),
                }
            }

            if is_default_set(values, self.default) {
                diagnostics.warn(WarningKind::DefaultTypeValue, property.raw_value.as_str());
            }
        }

        Ok(())
    }
}

fn is_default_set(values: &BTreeSet<String>, default: &[&str]) -> bool {
    let lower: BTreeSet<String> = values.iter().map(|v| v.to_ascii_lowercase()).collect();
    lower.len() == default.len() && default.iter().all(|d| lower.contains(*d))
}

impl ValueRule {
    fn check(self, property: &Property, diagnostics: &mut Diagnostics) -> ValidationResult<()> {
        let first = property.first_value().unwrap_or_default();

        match self {
            Self::Unchecked => Ok(()),
            Self::Literal(expected) if first.eq_ignore_ascii_case(expected) => Ok(()),
            Self::Literal(expected) => Err(ValidationError::with_detail(
                ErrorKind::InvalidValue,
                format!("{first} (expected \"{expected}\")"),
            )),
            Self::First(check) => check(first),
            Self::Every(check) => property.sub_values().try_for_each(check),
            Self::Custom(check) => check(property, diagnostics),
        }
    }
}

fn check_time_zone(value: &str) -> ValidationResult<()> {
    validate_time_zone(value).map(|_| ())
}

/// N: text components, warning about components that look like several
/// names joined by a space.
fn check_name(property: &Property, diagnostics: &mut Diagnostics) -> ValidationResult<()> {
    let joined: String = property.sub_values().collect();

    for name in property.sub_values() {
        validate_text_value(name)?;
        if name.contains(' ') && joined != name {
            diagnostics.warn(WarningKind::SplitName, name);
        }
    }

    Ok(())
}

/// BDAY: a date or date-time, warning when it lies in the future.
fn check_birthday(property: &Property, diagnostics: &mut Diagnostics) -> ValidationResult<()> {
    let value = property.first_value().unwrap_or_default();
    let date = validate_date_or_date_time(value)?;

    if date > Utc::now().date_naive() {
        diagnostics.warn(WarningKind::InvalidDate, value);
    }

    Ok(())
}

fn invalid_values(values: &BTreeSet<String>) -> ValidationError {
    ValidationError::with_detail(ErrorKind::InvalidParamValue, join_values(values))
}

/// PHOTO and LOGO: inline binary (`ENCODING=b`, optional `TYPE`) or a URI
/// (`VALUE=uri`), never both.
fn check_media_parameters(property: &Property, _: &mut Diagnostics) -> ValidationResult<()> {
    let parameters = &property.parameters;

    if parameters.is_empty() {
        return Err(ValidationError::new(ErrorKind::MissingParam));
    }

    for (name, values) in parameters {
        match name.as_str() {
            "ENCODING" => {
                if !is_only(values, "b") {
                    return Err(invalid_values(values));
                }
                if parameters.contains("VALUE") {
                    return Err(ValidationError::with_detail(
                        ErrorKind::MismatchParam,
                        "ENCODING and VALUE",
                    ));
                }
            }
            "TYPE" => {
                if !parameters.contains("ENCODING") {
                    return Err(ValidationError::with_detail(ErrorKind::MissingParam, "ENCODING"));
                }
            }
            "VALUE" => {
                if !is_only(values, "uri") {
                    return Err(invalid_values(values));
                }
            }
            _ => {
                return Err(ValidationError::with_detail(
                    ErrorKind::InvalidParamName,
                    name.as_str(),
                ));
            }
        }
    }

    Ok(())
}

fn check_media_value(property: &Property, _: &mut Diagnostics) -> ValidationResult<()> {
    if property.parameters.contains("VALUE") {
        validate_uri(property.first_value().unwrap_or_default())?;
    }
    Ok(())
}

/// SOURCE: either `VALUE=uri` or `CONTEXT=word`.
fn check_source_parameters(property: &Property, _: &mut Diagnostics) -> ValidationResult<()> {
    let parameters = &property.parameters;

    if parameters.is_empty() {
        return Err(ValidationError::new(ErrorKind::MissingParam));
    }

    for (name, values) in parameters {
        let (expected, other) = match name.as_str() {
            "VALUE" => ("uri", "CONTEXT"),
            "CONTEXT" => ("word", "VALUE"),
            _ => {
                return Err(ValidationError::with_detail(
                    ErrorKind::InvalidParamName,
                    name.as_str(),
                ));
            }
        };

        if !is_only(values, expected) {
            return Err(invalid_values(values));
        }
        if parameters.contains(other) {
            return Err(ValidationError::with_detail(
                ErrorKind::MismatchParam,
                "VALUE and CONTEXT",
            ));
        }
    }

    Ok(())
}

/// AGENT: with parameters, a single URI; without, an inline vCard.
fn check_agent(property: &Property, _: &mut Diagnostics) -> ValidationResult<()> {
    if property.parameters.is_empty() {
        // TODO: unescape the value and run it through the parser as an inline vCard.
        return Ok(());
    }

    for (name, values) in &property.parameters {
        if name != "VALUE" {
            return Err(ValidationError::with_detail(
                ErrorKind::InvalidParamName,
                name.as_str(),
            ));
        }
        if !is_only(values, "uri") {
            return Err(invalid_values(values));
        }
    }

    expect_count(ErrorKind::InvalidValueCount, property.values.len(), 1)?;
    for value in &property.values {
        expect_count(ErrorKind::InvalidSubvalueCount, value.len(), 1)?;
        value.iter().try_for_each(|uri| validate_uri(uri))?;
    }

    Ok(())
}
