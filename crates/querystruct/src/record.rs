//! Record field descriptions.
//!
//! A [`Record`] lists its fields in declaration order, each paired with a
//! [`FieldDescriptor`] carrying the declared name, declared type and the raw
//! `qs` annotation. `#[derive(QueryRecord)]` generates this listing.

use std::fmt;

use crate::value::QueryValue;

/// Annotation text that excludes a field from encoding.
pub const SKIP_TAG: &str = "-";

/// Annotation option that omits a field holding its zero value.
pub const OMIT_EMPTY: &str = "omitempty";

/// A structural aggregate with named fields.
pub trait Record {
    /// Returns the record's type name for diagnostics.
    fn type_name(&self) -> &'static str;

    /// Returns the record's fields in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;

    /// Returns the record's custom text rendering, if it has one.
    ///
    /// When present, a record used as a field value is rendered as a single
    /// scalar through this instead of being rejected.
    fn as_display(&self) -> Option<&dyn fmt::Display> {
        None
    }
}

/// Static metadata for one declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: &'static str,
    type_name: &'static str,
    tag: Option<&'static str>,
}

impl FieldDescriptor {
    /// Creates a descriptor from the declared name, type and annotation.
    #[must_use]
    pub const fn new(name: &'static str, type_name: &'static str, tag: Option<&'static str>) -> Self {
        Self {
            name,
            type_name,
            tag,
        }
    }

    /// Returns the declared field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the declared field type.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the raw annotation text.
    #[must_use]
    pub const fn tag(&self) -> Option<&'static str> {
        self.tag
    }

    /// Parses the annotation.
    #[must_use]
    pub fn options(&self) -> FieldTag<'static> {
        FieldTag::parse(self.tag)
    }
}

/// A parsed field annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTag<'a> {
    /// The field is never encoded.
    Skip,
    /// The field is encoded under `key`, or its declared name when `None`.
    Key {
        /// Key override
        key: Option<&'a str>,
        /// Whether a zero value omits the field
        omit_empty: bool,
    },
}

impl<'a> FieldTag<'a> {
    /// Parses `-` or `key[,omitempty]`.
    ///
    /// Only the segment directly after the first comma is inspected for
    /// `omitempty`. A missing annotation behaves like an empty one.
    #[must_use]
    pub fn parse(raw: Option<&'a str>) -> Self {
        let Some(raw) = raw else {
            return Self::Key {
                key: None,
                omit_empty: false,
            };
        };
        if raw == SKIP_TAG {
            return Self::Skip;
        }

        let mut parts = raw.split(',');
        let key = parts.next().filter(|key| !key.is_empty());
        let omit_empty = parts.next() == Some(OMIT_EMPTY);

        Self::Key { key, omit_empty }
    }

    /// Returns the effective key, falling back to `name`.
    #[must_use]
    pub fn key_or(&self, name: &'a str) -> Option<&'a str> {
        match self {
            Self::Skip => None,
            Self::Key { key, .. } => Some(key.unwrap_or(name)),
        }
    }
}

/// A field descriptor paired with the field's current value.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    descriptor: FieldDescriptor,
    value: &'a dyn QueryValue,
}

impl<'a> Field<'a> {
    /// Pairs a descriptor with a borrowed value.
    #[must_use]
    pub fn new(descriptor: FieldDescriptor, value: &'a dyn QueryValue) -> Self {
        Self { descriptor, value }
    }

    /// Returns the field's metadata.
    #[must_use]
    pub const fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    /// Returns the field's value.
    #[must_use]
    pub fn value(&self) -> &'a dyn QueryValue {
        self.value
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("descriptor", &self.descriptor)
            .field("value", &self.value.resolve())
            .finish()
    }
}
