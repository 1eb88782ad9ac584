//! Error types for query encoding.
//!
//! Both variants abort the whole encode call: no partially populated
//! [`QueryValues`](crate::QueryValues) is ever handed back alongside an error.

use thiserror::Error;

use crate::value::ValueKind;

/// Main error type for encoding operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The top-level value is neither absent nor a record.
    #[error("passed value (type: {0}) is not a struct")]
    NotAStruct(String),

    /// A field resolved to a shape that has no textual form.
    #[error("type cannot be serialized: {type_name} (field `{field}` is a {kind})")]
    UnsupportedType {
        /// Declared name of the offending field
        field: String,
        /// Declared type of the offending field
        type_name: String,
        /// Shape the field resolved to
        kind: ValueKind,
    },
}

/// Specialized result type for encoding operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotAStruct(_) => "NOT_A_STRUCT",
            Self::UnsupportedType { .. } => "UNSUPPORTED_TYPE",
        }
    }

    /// Returns the type name carried for diagnostics.
    ///
    /// For [`Error::NotAStruct`] this is the runtime type of the value passed
    /// in; for [`Error::UnsupportedType`] it is the field's declared type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::NotAStruct(type_name) | Self::UnsupportedType { type_name, .. } => type_name,
        }
    }

    pub(crate) fn unsupported(field: &str, type_name: &str, kind: ValueKind) -> Self {
        Self::UnsupportedType {
            field: field.to_string(),
            type_name: type_name.to_string(),
            kind,
        }
    }
}
