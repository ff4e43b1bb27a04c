//! vCard property parameters (RFC 2426 §4).

use std::collections::{BTreeMap, BTreeSet, btree_map};
use std::fmt;

/// The parameters of one property.
///
/// Names are normalized to uppercase. Each name maps to a set of values, so
/// `TYPE=WORK,VOICE,WORK` and `TYPE=VOICE;TYPE=WORK` store the same thing.
/// Values keep their original spelling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    inner: BTreeMap<String, BTreeSet<String>>,
}

impl Parameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `values` under `name`, merging with any values already present.
    pub fn insert<I, S>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner
            .entry(name.to_ascii_uppercase())
            .or_default()
            .extend(values.into_iter().map(Into::into));
    }

    /// Builder form of [`Parameters::insert`].
    #[must_use]
    pub fn with<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(name, values);
        self
    }

    /// Returns the values of parameter `name` (case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.inner.get(&name.to_ascii_uppercase())
    }

    /// Returns whether parameter `name` is present (case-insensitive).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns whether parameter `name` has exactly the single value `value`,
    /// compared ASCII case-insensitively.
    #[must_use]
    pub fn is_only(&self, name: &str, value: &str) -> bool {
        self.get(name)
            .is_some_and(|values| is_only(values, value))
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, BTreeSet<String>> {
        self.inner.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Returns whether `values` holds exactly one value equal to `value`,
/// ignoring ASCII case.
#[must_use]
pub fn is_only(values: &BTreeSet<String>, value: &str) -> bool {
    values.len() == 1 && values.iter().all(|v| v.eq_ignore_ascii_case(value))
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = (&'a String, &'a BTreeSet<String>);
    type IntoIter = btree_map::Iter<'a, String, BTreeSet<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

/// Formats as `NAME=a,b;OTHER=c`.
impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (name, values)) in self.inner.iter().enumerate() {
            if index > 0 {
                f.write_str(";")?;
            }
            write!(f, "{name}=")?;
            for (value_index, value) in values.iter().enumerate() {
                if value_index > 0 {
                    f.write_str(",")?;
                }
                f.write_str(value)?;
            }
        }
        Ok(())
    }
}
