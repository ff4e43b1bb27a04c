//! The parsed vCard document.

use std::fmt;
use std::str::FromStr;

use super::property::{Property, names};
use crate::rfc::vcard::parse::{Diagnostics, ValidationError, parse};

/// A validated vCard.
///
/// Holds the text it was parsed from verbatim; displaying a card yields
/// exactly that text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    raw_text: String,
    group: Option<String>,
    properties: Vec<Property>,
}

impl Card {
    pub(crate) fn new(raw_text: String, group: Option<String>, properties: Vec<Property>) -> Self {
        Self {
            raw_text,
            group,
            properties,
        }
    }

    /// The unprocessed text of the card.
    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// The group shared by every line, if the card is grouped.
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Properties in the order they appear.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Iterates over the properties named `name` (case-insensitive).
    pub fn properties_named<'a, 'b>(
        &'a self,
        name: &'b str,
    ) -> impl Iterator<Item = &'a Property> + use<'a, 'b> {
        self.properties.iter().filter(move |prop| prop.is(name))
    }

    /// Returns the first property named `name`.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|prop| prop.is(name))
    }

    /// Returns the formatted name (FN) value, escapes included.
    #[must_use]
    pub fn formatted_name(&self) -> Option<&str> {
        self.first(names::FN).and_then(Property::first_value)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_text)
    }
}

/// Parses a card, discarding any warnings.
impl FromStr for Card {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s, &mut Diagnostics::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: &str = "BEGIN:VCARD\r\nVERSION:3.0\r\nN:Doe;John;;;\r\nFN:John Doe\r\n\
        TEL;TYPE=work:+1-555-0100\r\nTEL;TYPE=home:+1-555-0199\r\nEND:VCARD\r\n";

    #[test]
    fn lookup_by_name() {
        let card: Card = CARD.parse().unwrap();

        let first = {
            let name = String::from("tel");
            card.first(&name)
        };
        assert_eq!(first.and_then(Property::first_value), Some("+1-555-0100"));

        let numbers: Vec<&str> = {
            let name = String::from("TEL");
            card.properties_named(&name)
                .filter_map(Property::first_value)
                .collect()
        };
        assert_eq!(numbers, vec!["+1-555-0100", "+1-555-0199"]);

        assert!(card.first("NOTE").is_none());
        assert_eq!(card.formatted_name(), Some("John Doe"));
    }
}
