//! Character classes from the RFC 2426 §4 grammar.
//!
//! `NON-ASCII` is defined over octets `%x80-FF`; on UTF-8 text every scalar
//! value at or above U+0080 is made of such octets, so the class covers all
//! non-ASCII characters.

/// Canonical line terminator.
pub const CRLF: &str = "\r\n";

/// Leading character of a folded continuation line.
pub const FOLD_CHAR: char = ' ';

/// Escape character used in values and parameters.
pub const ESCAPE_CHAR: char = '\\';

/// Maximum line length in characters, excluding the terminator (RFC 2426 §2.6).
pub const MAX_LINE_LENGTH: usize = 75;

/// Maximum line length including the terminator.
pub const MAX_LINE_LENGTH_RAW: usize = MAX_LINE_LENGTH + CRLF.len();

/// `ALPHA = %x41-5A / %x61-7A`
#[must_use]
pub const fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// `DIGIT = %x30-39`
#[must_use]
pub const fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Characters allowed in groups, names, IANA tokens, x-names and param-names.
#[must_use]
pub const fn is_id_char(c: char) -> bool {
    is_alpha(c) || is_digit(c) || c == '-'
}

/// `WSP = SP / HTAB`
#[must_use]
pub const fn is_wsp(c: char) -> bool {
    matches!(c, ' ' | '\t')
}

/// `NON-ASCII = %x80-FF`
#[must_use]
pub const fn is_non_ascii(c: char) -> bool {
    !c.is_ascii()
}

/// `QSAFE-CHAR`: any character except CTLs, `DQUOTE` and backslash.
#[must_use]
pub const fn is_qsafe_char(c: char) -> bool {
    is_wsp(c) || matches!(c, '\x21' | '\x23'..='\x5B' | '\x5D'..='\x7E') || is_non_ascii(c)
}

/// `SAFE-CHAR`: like `QSAFE-CHAR`, also excluding `,`, `:` and `;`.
#[must_use]
pub const fn is_safe_char(c: char) -> bool {
    is_wsp(c)
        || matches!(c, '\x21' | '\x23'..='\x2B' | '\x2D'..='\x39' | '\x3C'..='\x5B' | '\x5D'..='\x7E')
        || is_non_ascii(c)
}

/// `VALUE-CHAR = WSP / VCHAR / NON-ASCII`
#[must_use]
pub const fn is_value_char(c: char) -> bool {
    is_wsp(c) || matches!(c, '\x21'..='\x7E') || is_non_ascii(c)
}

/// Characters that may follow a backslash in a `text-value`.
#[must_use]
pub const fn is_escapable(c: char) -> bool {
    matches!(c, '\\' | ';' | ',' | 'n' | 'N')
}

/// Returns whether `s` is a non-empty run of ID characters.
#[must_use]
pub fn is_id(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_id_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_excludes_structural_characters() {
        for c in ['"', ',', ':', ';', '\\'] {
            assert!(!is_safe_char(c), "{c:?} must not be SAFE-CHAR");
        }
        assert!(is_safe_char('a'));
        assert!(is_safe_char(' '));
        assert!(is_safe_char('='));
    }

    #[test]
    fn qsafe_allows_separators_but_not_quote() {
        assert!(is_qsafe_char(','));
        assert!(is_qsafe_char(':'));
        assert!(is_qsafe_char(';'));
        assert!(!is_qsafe_char('"'));
        assert!(!is_qsafe_char('\\'));
    }

    #[test]
    fn control_characters_are_not_value_chars() {
        assert!(!is_value_char('\r'));
        assert!(!is_value_char('\n'));
        assert!(!is_value_char('\x0B'));
        assert!(!is_value_char('\x7F'));
        assert!(is_value_char('\t'));
    }

    #[test]
    fn non_ascii_is_accepted_everywhere() {
        for c in ['é', 'ÿ', 'Ç', '東'] {
            assert!(is_value_char(c));
            assert!(is_safe_char(c));
            assert!(is_qsafe_char(c));
        }
    }

    #[test]
    fn id_requires_content() {
        assert!(is_id("item-1"));
        assert!(!is_id(""));
        assert!(!is_id("item.1"));
    }

    #[test]
    fn raw_limit_includes_terminator() {
        assert_eq!(MAX_LINE_LENGTH_RAW, 77);
    }
}
