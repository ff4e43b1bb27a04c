//! vCard value grammar checks.
//!
//! Dates and times follow the ISO 8601 subset of RFC 2425 §5.8.4. Calendar
//! and clock ranges are delegated to `chrono`, URIs to `url`.

use std::collections::BTreeSet;

use chrono::{FixedOffset, NaiveDate, NaiveTime};
use url::Url;

use super::chars::{ESCAPE_CHAR, is_escapable, is_id, is_qsafe_char, is_safe_char};
use super::error::{ContextKey, ErrorKind, ValidationError, ValidationResult};
use crate::rfc::vcard::core::is_only;

/// Splits `n` leading ASCII digits off `s`.
fn take_digits(s: &str, n: usize) -> Option<(u32, &str)> {
    let head = s.get(..n)?;
    if !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((head.parse().ok()?, &s[n..]))
}

/// Formats a parameter value set as `a,b,c`.
pub(crate) fn join_values(values: &BTreeSet<String>) -> String {
    values.iter().map(String::as_str).collect::<Vec<_>>().join(",")
}

/// Validates a `date`: `YYYY-MM-DD` or `YYYYMMDD`.
///
/// ## Errors
/// `InvalidDate` when the text is malformed or not a real calendar day.
pub fn validate_date(text: &str) -> ValidationResult<NaiveDate> {
    parse_date(text).ok_or_else(|| ValidationError::for_string(ErrorKind::InvalidDate, text))
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    let (year, rest) = take_digits(text, 4)?;
    let (extended, rest) = match rest.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, rest),
    };
    let (month, rest) = take_digits(rest, 2)?;
    let rest = if extended { rest.strip_prefix('-')? } else { rest };
    let (day, rest) = take_digits(rest, 2)?;

    if !rest.is_empty() || year == 0 {
        return None;
    }

    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

/// Validates a UTC offset: `Z`, `+HH:MM` or `+HHMM`.
///
/// ## Errors
/// `InvalidTimeZone` when the offset is malformed or out of range.
pub fn validate_time_zone(text: &str) -> ValidationResult<FixedOffset> {
    parse_time_zone(text)
        .ok_or_else(|| ValidationError::for_string(ErrorKind::InvalidTimeZone, text))
}

fn parse_time_zone(text: &str) -> Option<FixedOffset> {
    if text == "Z" {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = if let Some(rest) = text.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = text.strip_prefix('-') {
        (-1, rest)
    } else {
        return None;
    };

    let (hours, rest) = take_digits(rest, 2)?;
    let rest = rest.strip_prefix(':').unwrap_or(rest);
    let (minutes, rest) = take_digits(rest, 2)?;

    if !rest.is_empty() || minutes >= 60 {
        return None;
    }

    let seconds = i32::try_from(hours * 3600 + minutes * 60).ok()?;
    FixedOffset::east_opt(sign * seconds)
}

/// Validates a `time`: `HH:MM:SS` or `HHMMSS`, an optional `,fraction` and
/// an optional UTC offset.
///
/// ## Errors
/// `InvalidTime` for a malformed clock time; `InvalidTimeZone`, carrying
/// only the offset part, for a malformed offset.
pub fn validate_time(text: &str) -> ValidationResult<NaiveTime> {
    let (time, zone) =
        split_time(text).ok_or_else(|| ValidationError::for_string(ErrorKind::InvalidTime, text))?;

    if !zone.is_empty() {
        validate_time_zone(zone)?;
    }

    Ok(time)
}

fn split_time(text: &str) -> Option<(NaiveTime, &str)> {
    let (hours, rest) = take_digits(text, 2)?;
    let (extended, rest) = match rest.strip_prefix(':') {
        Some(rest) => (true, rest),
        None => (false, rest),
    };
    let (minutes, rest) = take_digits(rest, 2)?;
    let rest = if extended { rest.strip_prefix(':')? } else { rest };
    let (seconds, mut rest) = take_digits(rest, 2)?;

    if let Some(fraction) = rest.strip_prefix(',') {
        let end = fraction
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(fraction.len());
        if end == 0 {
            return None;
        }
        rest = &fraction[end..];
    }

    Some((NaiveTime::from_hms_opt(hours, minutes, seconds)?, rest))
}

/// Validates a `date` optionally followed by `T` and a `time`.
///
/// ## Errors
/// Whatever [`validate_date`] or [`validate_time`] reports.
pub fn validate_date_or_date_time(text: &str) -> ValidationResult<NaiveDate> {
    match text.split_once('T') {
        Some((date, time)) => {
            let date = validate_date(date)?;
            validate_time(time)?;
            Ok(date)
        }
        None => validate_date(text),
    }
}

/// Validates an RFC 1766 language tag, case-insensitively.
///
/// ## Errors
/// `InvalidLanguage`, carrying the lowercased tag.
pub fn validate_language_tag(text: &str) -> ValidationResult<()> {
    let tag = text.to_ascii_lowercase();
    let valid = tag.split('-').all(|part| {
        (1..=8).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_lowercase())
    });

    if valid {
        Ok(())
    } else {
        Err(ValidationError::for_string(ErrorKind::InvalidLanguage, &tag))
    }
}

/// Validates an `x-name`: `X-` followed by ID characters.
///
/// ## Errors
/// `InvalidXName`.
pub fn validate_x_name(text: &str) -> ValidationResult<()> {
    if text.strip_prefix("X-").is_some_and(is_id) {
        Ok(())
    } else {
        Err(ValidationError::for_string(ErrorKind::InvalidXName, text))
    }
}

/// Validates `ptext = *SAFE-CHAR`.
///
/// ## Errors
/// `InvalidParamValue`.
pub fn validate_ptext(text: &str) -> ValidationResult<()> {
    if text.chars().all(is_safe_char) {
        Ok(())
    } else {
        Err(ValidationError::for_string(ErrorKind::InvalidParamValue, text))
    }
}

/// Validates `quoted-string = DQUOTE QSAFE-CHAR+ DQUOTE`.
///
/// ## Errors
/// `InvalidParamValue`.
pub fn validate_quoted_string(text: &str) -> ValidationResult<()> {
    let valid = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .is_some_and(|inner| !inner.is_empty() && inner.chars().all(is_qsafe_char));

    if valid {
        Ok(())
    } else {
        Err(ValidationError::for_string(ErrorKind::InvalidParamValue, text))
    }
}

/// Validates `param-value = ptext / quoted-string`.
///
/// ## Errors
/// `InvalidParamValue`.
pub fn validate_param_value(text: &str) -> ValidationResult<()> {
    validate_ptext(text).or_else(|_| validate_quoted_string(text))
}

/// Validates a `text-value`: SAFE characters, `:` and `"`, plus the escapes
/// `\\`, `\;`, `\,`, `\n` and `\N`.
///
/// ## Errors
/// `InvalidTextValue`.
pub fn validate_text_value(text: &str) -> ValidationResult<()> {
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        let valid = if c == ESCAPE_CHAR {
            chars.next().is_some_and(is_escapable)
        } else {
            is_safe_char(c) || c == ':' || c == '"'
        };

        if !valid {
            return Err(ValidationError::for_string(ErrorKind::InvalidTextValue, text));
        }
    }

    Ok(())
}

/// Validates a `float`: optional sign, digits, optional `.` and digits.
///
/// ## Errors
/// `InvalidSubvalue`.
pub fn validate_float(text: &str) -> ValidationResult<()> {
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let valid = match unsigned.split_once('.') {
        Some((integer, fraction)) => is_digits(integer) && is_digits(fraction),
        None => is_digits(unsigned),
    };

    if valid {
        Ok(())
    } else {
        Err(
            ValidationError::with_detail(ErrorKind::InvalidSubvalue, "expected float value")
                .context(ContextKey::String, text),
        )
    }
}

/// Validates a URI with a scheme and a host or path.
///
/// ## Errors
/// `InvalidUri`.
pub fn validate_uri(text: &str) -> ValidationResult<()> {
    match Url::parse(text) {
        Ok(url) if url.has_host() || !url.path().is_empty() => Ok(()),
        Ok(_) => Err(ValidationError::for_string(ErrorKind::InvalidUri, text)),
        Err(error) => {
            tracing::trace!(%error, uri = text, "URI rejected");
            Err(ValidationError::for_string(ErrorKind::InvalidUri, text))
        }
    }
}

/// Validates a `text-param`.
///
/// `VALUE` must be `ptext` or `text`, `LANGUAGE` a single language tag; any
/// other parameter must be an `x-name` with exactly one `param-value`.
///
/// ## Errors
/// `InvalidParamValue`, `InvalidLanguage` or `InvalidXName`.
pub fn validate_text_parameter(name: &str, values: &BTreeSet<String>) -> ValidationResult<()> {
    let invalid = || ValidationError::with_detail(ErrorKind::InvalidParamValue, join_values(values));

    if name.eq_ignore_ascii_case("VALUE") {
        if is_only(values, "ptext") || is_only(values, "text") {
            return Ok(());
        }
        return Err(invalid());
    }

    if name.eq_ignore_ascii_case("LANGUAGE") {
        let mut iter = values.iter();
        let (Some(tag), None) = (iter.next(), iter.next()) else {
            return Err(invalid());
        };
        return validate_language_tag(tag);
    }

    validate_x_name(name)?;
    let mut iter = values.iter();
    let (Some(value), None) = (iter.next(), iter.next()) else {
        return Err(invalid());
    };
    validate_param_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn date_forms() {
        assert!(validate_date("20000101").is_ok());
        assert!(validate_date("2000-01-01").is_ok());
    }

    #[test]
    fn date_rejects_bad_syntax() {
        for text in ["2000:01:01", "2000101", "aaaa-bb-cc", "2000-0101", "2000-01-01x", ""] {
            let err = validate_date(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidDate, "{text}");
            assert_eq!(err.get_context(&ContextKey::String), Some(text));
        }
    }

    #[test]
    fn date_leap_years() {
        assert!(validate_date("20080229").is_ok());
        assert!(validate_date("2000-02-29").is_ok());
        assert!(validate_date("2010-02-29").is_err());
        assert!(validate_date("1900-02-29").is_err());
        assert!(validate_date("2000-13-01").is_err());
    }

    #[test]
    fn date_rejects_year_zero() {
        let err = validate_date("0000-01-01").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDate);
        assert!(validate_date("00000101").is_err());
        assert!(validate_date("0001-01-01").is_ok());
    }

    #[test]
    fn time_zone_forms() {
        for text in ["Z", "+01:00", "-12:30", "+23:59", "-0001", "-00:30", "+00:30"] {
            assert!(validate_time_zone(text).is_ok(), "{text}");
        }
        assert_eq!(
            validate_time_zone("-12:30").unwrap().local_minus_utc(),
            -(12 * 3600 + 30 * 60)
        );
    }

    #[test]
    fn time_zone_rejects() {
        for text in ["Z+01:00", "+1:00", "0100", "01", "01:", "01:1", "+01:60", "+24:00"] {
            let err = validate_time_zone(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidTimeZone, "{text}");
        }
    }

    #[test]
    fn time_forms() {
        for text in ["00:00:00", "000000", "01:02:03Z", "01:02:03+01:30", "23:59:59,5"] {
            assert!(validate_time(text).is_ok(), "{text}");
        }
    }

    #[test]
    fn time_rejects_out_of_range() {
        for text in ["01:02:60", "01:60:59", "24:00:00", "01:0203", "01:02:03,"] {
            assert_eq!(
                validate_time(text).unwrap_err().kind(),
                ErrorKind::InvalidTime,
                "{text}"
            );
        }
    }

    #[test]
    fn time_reports_zone_part() {
        let err = validate_time("00:00:00Z+01").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTimeZone);
        assert_eq!(err.get_context(&ContextKey::String), Some("Z+01"));
    }

    #[test]
    fn date_time() {
        assert!(validate_date_or_date_time("1953-10-15T23:10:00Z").is_ok());
        assert_eq!(
            validate_date_or_date_time("1953-10-15T25:10:00Z")
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidTime
        );
    }

    #[test]
    fn language_tags() {
        assert!(validate_language_tag("en").is_ok());
        assert!(validate_language_tag("en-US").is_ok());

        let err = validate_language_tag("-US").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLanguage);
        assert_eq!(err.get_context(&ContextKey::String), Some("-us"));
        assert!(validate_language_tag("en-").is_err());
        assert!(validate_language_tag("toolongtag").is_err());
    }

    #[test]
    fn x_names() {
        assert!(validate_x_name("X-abc").is_ok());
        assert!(validate_x_name("X-a-1").is_ok());
        for text in ["X-", "", "x-abc", "foo", "X-a.b"] {
            assert_eq!(
                validate_x_name(text).unwrap_err().kind(),
                ErrorKind::InvalidXName
            );
        }
    }

    #[test]
    fn param_values() {
        assert!(validate_param_value("").is_ok());
        assert!(validate_param_value("plain text").is_ok());
        assert!(validate_param_value("\"a;b:c,d\"").is_ok());
        assert!(validate_param_value("\"ÿÿ\"").is_ok());
        assert!(validate_param_value("\"\"").is_err());
        assert!(validate_param_value("a;b").is_err());
        assert!(validate_ptext("\u{b}").is_err());
    }

    #[test]
    fn text_values() {
        assert!(validate_text_value("").is_ok());
        assert!(validate_text_value("\\,").is_ok());
        assert!(validate_text_value("\\n").is_ok());
        assert!(validate_text_value("a: \"quoted\"").is_ok());
        assert_eq!(
            validate_text_value(";").unwrap_err().kind(),
            ErrorKind::InvalidTextValue
        );
        assert!(validate_text_value("\\\\;").is_err());
        assert!(validate_text_value("trailing\\").is_err());
        assert!(validate_text_value("\\x").is_err());
    }

    #[test]
    fn floats() {
        for text in ["12", "12.345", "+12.345", "-12.345"] {
            assert!(validate_float(text).is_ok(), "{text}");
        }
        for text in ["12.", ".12", "foo", "++12.345", "--12.345", "12.34.5", ""] {
            let err = validate_float(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidSubvalue, "{text}");
        }
    }

    #[test]
    fn uris() {
        assert!(validate_uri("http://example.org/").is_ok());
        assert!(validate_uri("mailto:jane@example.com").is_ok());
        assert!(validate_uri("http\\://example.org/").is_err());
        assert!(validate_uri("http:").is_err());
        assert!(validate_uri("not a uri").is_err());
    }

    #[test]
    fn text_parameters() {
        assert!(validate_text_parameter("VALUE", &set(&["ptext"])).is_ok());
        assert!(validate_text_parameter("VALUE", &set(&["TEXT"])).is_ok());
        assert!(validate_text_parameter("VALUE", &set(&["uri"])).is_err());
        assert!(validate_text_parameter("LANGUAGE", &set(&["en-US"])).is_ok());
        assert!(validate_text_parameter("LANGUAGE", &set(&["en", "fr"])).is_err());
        assert!(validate_text_parameter("X-FOO", &set(&["bar"])).is_ok());
        assert_eq!(
            validate_text_parameter("TYPE", &set(&["work"]))
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidXName
        );
        assert!(validate_text_parameter("X-FOO", &set(&["a", "b"])).is_err());
    }
}
