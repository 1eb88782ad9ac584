//! # querystruct
//!
//! Encode tagged Rust structs into URL query strings.
//!
//! Fields are described by `#[derive(QueryRecord)]` and annotated with
//! `#[qs("key[,omitempty]")]` or `#[qs("-")]`. Encoding produces an ordered
//! [`QueryValues`] multi-map which serializes to canonical form-urlencoded
//! text.
//!
//! ```
//! use querystruct::QueryRecord;
//!
//! #[derive(QueryRecord)]
//! struct SearchParams {
//!     #[qs("q")]
//!     query: String,
//!     #[qs("num,omitempty")]
//!     count: u32,
//!     #[qs("opt")]
//!     options: Vec<String>,
//! }
//!
//! let params = SearchParams {
//!     query: "apple pie".into(),
//!     count: 10,
//!     options: vec!["safe".into(), "localized".into()],
//! };
//!
//! let values = querystruct::encode(&params).unwrap();
//! assert_eq!(values.to_query_string(), "num=10&opt=safe&opt=localized&q=apple+pie");
//! ```
//!
//! ## Modules
//!
//! - [`encoder`] - Field walking and rendering
//! - [`value`] - Value shapes and zero-value detection
//! - [`record`] - Field descriptors and annotation parsing
//! - [`query`] - Ordered query multi-map and serialization
//! - [`config`] - Serialization options
//! - [`error`] - Error types

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod encoder;
pub mod error;
pub mod query;
pub mod record;
pub mod value;

// Re-export commonly used types
pub use config::{QueryStringConfig, SpaceEncoding};
pub use encoder::{encode, FieldEncoder};
pub use error::{Error, Result};
pub use query::QueryValues;
pub use record::{Field, FieldDescriptor, FieldTag, Record};
pub use value::{QueryValue, Resolved, ValueKind};

#[cfg(feature = "derive")]
pub use querystruct_derive::QueryRecord;
