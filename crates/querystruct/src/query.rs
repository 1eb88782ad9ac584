//! Ordered multi-map of query parameters.
//!
//! [`QueryValues`] keeps keys in first-insertion order and each key's values
//! in insertion order. Serializing it to text sorts keys (by default) and
//! applies form-urlencoded escaping.

use std::fmt;

use serde::{Serialize, Serializer};
use url::{form_urlencoded, Url};

use crate::config::{QueryStringConfig, SpaceEncoding};

/// Ordered collection of query keys, each with one or more values.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryValues {
    entries: Vec<(String, Vec<String>)>,
}

impl QueryValues {
    /// Create a new, empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Append a value under `key`, keeping any existing values.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(index) => self.entries[index].1.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    /// Replace every value under `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(index) => self.entries[index].1 = vec![value],
            None => self.entries.push((key, vec![value])),
        }
    }

    /// Return the first value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_all(key).first().map(String::as_str)
    }

    /// Return every value stored under `key`, in insertion order.
    #[must_use]
    pub fn get_all(&self, key: &str) -> &[String] {
        match self.position(key) {
            Some(index) => &self.entries[index].1,
            None => &[],
        }
    }

    /// Remove `key` and return its values.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.position(key)
            .map(|index| self.entries.remove(index).1)
    }

    /// Returns true if `key` has at least one value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over keys in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Iterate over keys with their values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Iterate over individual key/value pairs in insertion order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
            .flat_map(|(key, values)| values.iter().map(move |value| (key, value.as_str())))
    }

    /// Return the collected key/value pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.pairs()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn ordered(&self, sort_keys: bool) -> Vec<(&str, &[String])> {
        let mut keyed: Vec<_> = self.iter().collect();
        if sort_keys {
            keyed.sort_by(|a, b| a.0.cmp(b.0));
        }
        keyed
    }

    /// Encode as `key=value&...` with keys sorted and spaces as `+`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.to_query_string_with(&QueryStringConfig::default())
    }

    /// Encode using the given configuration.
    #[must_use]
    pub fn to_query_string_with(&self, config: &QueryStringConfig) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, values) in self.ordered(config.sort_keys) {
            for value in values {
                serializer.append_pair(key, value);
            }
        }
        let encoded = serializer.finish();

        match config.space_encoding {
            SpaceEncoding::Plus => encoded,
            // Literal '+' is already escaped as %2B, so every '+' left is a space.
            SpaceEncoding::Percent => encoded.replace('+', "%20"),
        }
    }

    /// Append the parameters to `url`'s query, keys sorted.
    pub fn apply_to(&self, url: &mut Url) {
        if self.is_empty() {
            return;
        }
        let mut query = url.query_pairs_mut();
        for (key, values) in self.ordered(true) {
            for value in values {
                query.append_pair(key, value);
            }
        }
    }
}

impl fmt::Display for QueryValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Serializes as a sequence of `(key, value)` pairs in insertion order, the
/// shape accepted by form-urlencoded serializers such as
/// `reqwest::RequestBuilder::query`.
impl Serialize for QueryValues {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.pairs())
    }
}

impl<K, V> FromIterator<(K, V)> for QueryValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        values.extend(iter);
        values
    }
}

impl<K, V> Extend<(K, V)> for QueryValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

impl IntoIterator for QueryValues {
    type Item = (String, Vec<String>);
    type IntoIter = std::vec::IntoIter<(String, Vec<String>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
