//! Configuration for query-string serialization.
//!
//! [`QueryStringConfig`] controls how a [`QueryValues`](crate::QueryValues)
//! container is turned into query text. The defaults produce canonical
//! form-urlencoded output: keys sorted, spaces written as `+`.

use serde::{Deserialize, Serialize};

/// How a space character is written in the encoded output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceEncoding {
    /// `+`, as in `application/x-www-form-urlencoded`
    #[default]
    Plus,
    /// `%20`
    Percent,
}

/// Serialization options for query strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryStringConfig {
    /// Whether keys are sorted lexicographically before joining
    #[serde(default = "default_sort_keys")]
    pub sort_keys: bool,

    /// Space character encoding
    #[serde(default)]
    pub space_encoding: SpaceEncoding,
}

const fn default_sort_keys() -> bool {
    true
}

impl QueryStringConfig {
    /// Create a configuration with canonical defaults.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sort_keys: default_sort_keys(),
            space_encoding: SpaceEncoding::Plus,
        }
    }

    /// Set whether keys are sorted.
    #[must_use]
    pub const fn with_sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }

    /// Set the space encoding.
    #[must_use]
    pub const fn with_space_encoding(mut self, encoding: SpaceEncoding) -> Self {
        self.space_encoding = encoding;
        self
    }
}

impl Default for QueryStringConfig {
    fn default() -> Self {
        Self::new()
    }
}
