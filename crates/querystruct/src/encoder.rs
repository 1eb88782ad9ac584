//! Record-to-query encoding.
//!
//! [`FieldEncoder`] walks a record's fields in declaration order and appends
//! one entry per scalar field, or one entry per element of a sequence field,
//! to a [`QueryValues`] container. It never sorts; ordering for the final
//! text is the container's concern.
//!
//! Rules applied per field:
//!
//! - a field annotated exactly `-` is skipped;
//! - the key is the annotation's key segment, or the declared field name;
//! - a field equal to its type's zero value is skipped when annotated
//!   `omitempty`, otherwise emitted (an absent value renders as `""`);
//! - maps, callables, channels, raw pointers and complex numbers abort the
//!   whole call with [`Error::UnsupportedType`].

use std::any::type_name;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::query::QueryValues;
use crate::record::{Field, FieldDescriptor, FieldTag, Record};
use crate::value::{QueryValue, Resolved, ValueKind};

/// Encodes records into an ordered query multi-map.
///
/// Several records can be encoded into the same container; entries from a
/// call that fails are discarded.
#[derive(Debug, Default, Clone)]
pub struct FieldEncoder {
    values: QueryValues,
}

impl FieldEncoder {
    /// Create an encoder with an empty output container.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: QueryValues::new(),
        }
    }

    /// Create an encoder that appends to existing values.
    #[must_use]
    pub const fn with_values(values: QueryValues) -> Self {
        Self { values }
    }

    /// Encode `value` and append its entries.
    ///
    /// An absent value (e.g. `None`) appends nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAStruct`] if `value` does not resolve to a record,
    /// and [`Error::UnsupportedType`] if any field cannot be rendered. In
    /// both cases no entries are appended.
    pub fn encode<T>(&mut self, value: &T) -> Result<&mut Self>
    where
        T: QueryValue + ?Sized,
    {
        let record = match value.resolve() {
            Resolved::Absent => {
                trace!(type_name = type_name::<T>(), "absent input, nothing to encode");
                return Ok(self);
            }
            Resolved::Record(record) => record,
            _ => return Err(Error::NotAStruct(type_name::<T>().to_string())),
        };

        let entries = encode_record(record)?;
        self.values.extend(entries);
        Ok(self)
    }

    /// Returns the values collected so far.
    #[must_use]
    pub const fn values(&self) -> &QueryValues {
        &self.values
    }

    /// Consume the encoder and return the collected values.
    #[must_use]
    pub fn finish(self) -> QueryValues {
        self.values
    }
}

/// Encode a single record into a new [`QueryValues`].
///
/// # Errors
///
/// See [`FieldEncoder::encode`].
pub fn encode<T>(value: &T) -> Result<QueryValues>
where
    T: QueryValue + ?Sized,
{
    let mut encoder = FieldEncoder::new();
    encoder.encode(value)?;
    Ok(encoder.finish())
}

/// A field with its annotation applied and indirection followed.
struct ResolvedField<'a> {
    descriptor: &'a FieldDescriptor,
    key: &'static str,
    value: Resolved<'a>,
}

impl<'a> ResolvedField<'a> {
    /// Returns `None` when the field is excluded by its annotation or is an
    /// omitted zero value.
    fn resolve(field: &'a Field<'a>) -> Option<Self> {
        let descriptor = field.descriptor();
        let FieldTag::Key { key, omit_empty } = descriptor.options() else {
            trace!(field = descriptor.name(), "field tagged `-`, skipping");
            return None;
        };

        if omit_empty && field.value().is_zero() {
            trace!(field = descriptor.name(), "zero value with omitempty, skipping");
            return None;
        }

        Some(Self {
            descriptor,
            key: key.unwrap_or(descriptor.name()),
            value: field.value().resolve(),
        })
    }

    fn render_into(self, entries: &mut Vec<(&'static str, String)>) -> Result<()> {
        let Self {
            descriptor,
            key,
            value,
        } = self;
        let unsupported =
            |kind| Error::unsupported(descriptor.name(), descriptor.type_name(), kind);

        let elements = match value {
            Resolved::Sequence(elements) => elements,
            value => {
                entries.push((key, render(value).map_err(unsupported)?));
                return Ok(());
            }
        };

        for element in elements {
            entries.push((key, render(element.resolve()).map_err(unsupported)?));
        }
        Ok(())
    }
}

/// Renders a single value to its display form.
fn render(value: Resolved<'_>) -> std::result::Result<String, ValueKind> {
    match value {
        Resolved::Absent => Ok(String::new()),
        Resolved::Text(text) => Ok(text.to_string()),
        Resolved::Scalar(scalar) => Ok(scalar.to_string()),
        Resolved::Record(record) => record
            .as_display()
            .map(ToString::to_string)
            .ok_or(ValueKind::Record),
        Resolved::Sequence(_) => Err(ValueKind::Sequence),
        Resolved::Unsupported(kind) => Err(kind),
    }
}

fn encode_record(record: &dyn Record) -> Result<Vec<(&'static str, String)>> {
    let fields = record.fields();
    let mut entries = Vec::with_capacity(fields.len());

    for field in &fields {
        if let Some(resolved) = ResolvedField::resolve(field) {
            resolved.render_into(&mut entries)?;
        }
    }

    debug!(
        record = record.type_name(),
        fields = fields.len(),
        entries = entries.len(),
        "encoded record"
    );
    Ok(entries)
}
