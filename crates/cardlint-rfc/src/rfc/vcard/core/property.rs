//! vCard property types (RFC 2426).

use super::parameter::Parameters;

/// One logical content line of a vCard.
///
/// `values` holds the semicolon-separated values, each split further into
/// its comma-separated sub-values. Escapes are kept as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Property name as written.
    pub name: String,
    /// Parameters, keyed by uppercased name.
    pub parameters: Parameters,
    /// Values, each a non-empty list of sub-values.
    pub values: Vec<Vec<String>>,
    /// The value string as written, without terminator.
    pub raw_value: String,
}

impl Property {
    /// Creates a property with no parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<Vec<String>>, raw_value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Parameters::new(),
            values,
            raw_value: raw_value.into(),
        }
    }

    /// Adds parameters to this property.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Returns whether this property is named `name` (case-insensitive).
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Returns the uppercased name.
    #[must_use]
    pub fn upper_name(&self) -> String {
        self.name.to_ascii_uppercase()
    }

    /// Returns whether the name is an extension (`X-`) name.
    #[must_use]
    pub fn is_extension(&self) -> bool {
        self.name
            .get(..2)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("X-"))
    }

    /// Returns the first sub-value of the first value.
    #[must_use]
    pub fn first_value(&self) -> Option<&str> {
        self.values
            .first()
            .and_then(|value| value.first())
            .map(String::as_str)
    }

    /// Iterates over every sub-value in order.
    pub fn sub_values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().flatten().map(String::as_str)
    }
}

/// Property names registered by RFC 2426.
pub mod names {
    // Predefined type usage (§2.1)
    pub const BEGIN: &str = "BEGIN";
    pub const END: &str = "END";
    pub const NAME: &str = "NAME";
    pub const PROFILE: &str = "PROFILE";
    pub const SOURCE: &str = "SOURCE";

    // Identification (§3.1)
    pub const FN: &str = "FN";
    pub const N: &str = "N";
    pub const NICKNAME: &str = "NICKNAME";
    pub const PHOTO: &str = "PHOTO";
    pub const BDAY: &str = "BDAY";

    // Delivery addressing (§3.2)
    pub const ADR: &str = "ADR";
    pub const LABEL: &str = "LABEL";

    // Telecommunications addressing (§3.3)
    pub const TEL: &str = "TEL";
    pub const EMAIL: &str = "EMAIL";
    pub const MAILER: &str = "MAILER";

    // Geographical (§3.4)
    pub const TZ: &str = "TZ";
    pub const GEO: &str = "GEO";

    // Organizational (§3.5)
    pub const TITLE: &str = "TITLE";
    pub const ROLE: &str = "ROLE";
    pub const LOGO: &str = "LOGO";
    pub const AGENT: &str = "AGENT";
    pub const ORG: &str = "ORG";

    // Explanatory (§3.6)
    pub const CATEGORIES: &str = "CATEGORIES";
    pub const NOTE: &str = "NOTE";
    pub const PRODID: &str = "PRODID";
    pub const REV: &str = "REV";
    pub const SORT_STRING: &str = "SORT-STRING";
    pub const SOUND: &str = "SOUND";
    pub const UID: &str = "UID";
    pub const URL: &str = "URL";
    pub const VERSION: &str = "VERSION";

    // Security (§3.7)
    pub const CLASS: &str = "CLASS";
    pub const KEY: &str = "KEY";

    /// Properties every vCard must contain, in the order they are checked.
    pub const MANDATORY: [&str; 5] = [BEGIN, END, FN, N, VERSION];

    /// Every registered property name.
    pub const KNOWN: [&str; 33] = [
        BEGIN, END, NAME, PROFILE, SOURCE, FN, N, NICKNAME, PHOTO, BDAY, ADR, LABEL, TEL, EMAIL,
        MAILER, TZ, GEO, TITLE, ROLE, LOGO, AGENT, ORG, CATEGORIES, NOTE, PRODID, REV,
        SORT_STRING, SOUND, UID, URL, VERSION, CLASS, KEY,
    ];

    /// Returns whether `name` is registered (case-insensitive).
    #[must_use]
    pub fn is_known(name: &str) -> bool {
        KNOWN.iter().any(|known| known.eq_ignore_ascii_case(name))
    }
}
