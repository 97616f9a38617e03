//! Node and store capability attributes.
//!
//! Attributes are colon-separated descriptive tokens (device class, speed,
//! locality) attached to a node or a store, e.g. `ssd:7200rpm` or
//! `us-east:rack-4`. They are later matched against placement preferences.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered set of capability tokens.
///
/// Order is preserved as given and duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attributes {
    attrs: Vec<String>,
}

impl Attributes {
    /// Parse a colon-separated attribute list, dropping empty segments.
    ///
    /// `""`, `":"` and `"::"` all yield an empty set. Parsing never fails.
    pub fn parse(attrs: &str) -> Self {
        Self {
            attrs: attrs
                .split(':')
                .filter(|attr| !attr.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Build attributes from already separated tokens, dropping empty ones.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attrs: tokens
                .into_iter()
                .map(Into::into)
                .filter(|attr: &String| !attr.is_empty())
                .collect(),
        }
    }

    /// Get the tokens in order.
    pub fn as_slice(&self) -> &[String] {
        &self.attrs
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Check if there are no tokens.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Check if a token is present.
    pub fn contains(&self, attr: &str) -> bool {
        self.attrs.iter().any(|a| a == attr)
    }

    /// Check if every token of `self` is also present in `other`.
    ///
    /// Used to test whether a node or store satisfies a required set.
    pub fn is_subset(&self, other: &Attributes) -> bool {
        self.attrs.iter().all(|attr| other.contains(attr))
    }

    /// Sorted, comma-joined form for stable comparison and logging.
    pub fn sorted_string(&self) -> String {
        let mut sorted = self.attrs.clone();
        sorted.sort();
        sorted.join(",")
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.attrs.join(":"))
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.attrs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_and_separators() {
        assert!(Attributes::parse("").is_empty());
        assert!(Attributes::parse(":").is_empty());
        assert!(Attributes::parse("::").is_empty());
    }

    #[test]
    fn test_parse_preserves_order_and_duplicates() {
        let attrs = Attributes::parse("ssd:7200rpm:ssd");
        assert_eq!(attrs.as_slice(), &["ssd", "7200rpm", "ssd"]);
    }

    #[test]
    fn test_parse_skips_inner_empties() {
        let attrs = Attributes::parse(":hdd::7200rpm:");
        assert_eq!(attrs.as_slice(), &["hdd", "7200rpm"]);
        assert_eq!(attrs.to_string(), "hdd:7200rpm");
    }

    #[test]
    fn test_is_subset() {
        let node = Attributes::parse("us-east:ssd:rack-4");
        assert!(Attributes::parse("ssd").is_subset(&node));
        assert!(Attributes::parse("").is_subset(&node));
        assert!(!Attributes::parse("ssd:hdd").is_subset(&node));
    }

    #[test]
    fn test_sorted_string() {
        let attrs = Attributes::from_tokens(["ssd", "", "fio", "hdd"]);
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs.sorted_string(), "fio,hdd,ssd");
    }
}
