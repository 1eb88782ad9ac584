//! Value shapes understood by the encoder.
//!
//! Every field type implements [`QueryValue`], which answers two questions:
//! what the value looks like once reference indirection is followed
//! ([`QueryValue::resolve`]) and whether it equals the default value of its
//! declared type ([`QueryValue::is_zero`]).

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::fmt;
use std::num::{
    NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI8, NonZeroU16, NonZeroU32, NonZeroU64,
    NonZeroU8, NonZeroUsize,
};
use std::ptr::NonNull;
use std::rc::Rc;
use std::sync::mpsc::{Receiver, Sender, SyncSender};
use std::sync::Arc;

use crate::record::Record;

/// Shapes that have no textual query representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Associative container
    Map,
    /// Function pointer or closure
    Callable,
    /// Channel endpoint
    Channel,
    /// Raw, unmanaged pointer
    RawPointer,
    /// Complex number
    Complex,
    /// Record without a custom `Display` rendering
    Record,
    /// Sequence nested inside a sequence
    Sequence,
}

impl ValueKind {
    /// Returns a human-readable name for the shape.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Map => "map",
            Self::Callable => "callable",
            Self::Channel => "channel",
            Self::RawPointer => "raw pointer",
            Self::Complex => "complex number",
            Self::Record => "record",
            Self::Sequence => "nested sequence",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value after every layer of reference indirection has been followed.
pub enum Resolved<'a> {
    /// An absent optional reference.
    Absent,
    /// Literal text.
    Text(&'a str),
    /// Any value rendered through its `Display` impl.
    Scalar(&'a dyn fmt::Display),
    /// An ordered sequence; each element yields one query entry.
    Sequence(Vec<&'a dyn QueryValue>),
    /// A record with named fields.
    Record(&'a dyn Record),
    /// A shape the encoder refuses to render.
    Unsupported(ValueKind),
}

impl fmt::Debug for Resolved<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("Absent"),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Scalar(value) => f.debug_tuple("Scalar").field(&value.to_string()).finish(),
            Self::Sequence(elements) => f.debug_tuple("Sequence").field(&elements.len()).finish(),
            Self::Record(record) => f.debug_tuple("Record").field(&record.type_name()).finish(),
            Self::Unsupported(kind) => f.debug_tuple("Unsupported").field(kind).finish(),
        }
    }
}

/// A value that can appear as a record field.
pub trait QueryValue {
    /// Follows reference indirection and reports the value's shape.
    fn resolve(&self) -> Resolved<'_>;

    /// Returns true if the value equals the default of its declared type.
    ///
    /// Nullable wrappers (`Option`) are zero only when absent; non-null
    /// wrappers (`Box`, `Rc`, `Arc`, references) defer to the pointee.
    fn is_zero(&self) -> bool;
}

macro_rules! scalar_value {
    ($($ty:ty => |$v:ident| $zero:expr),* $(,)?) => {
        $(
            impl QueryValue for $ty {
                fn resolve(&self) -> Resolved<'_> {
                    Resolved::Scalar(self)
                }

                fn is_zero(&self) -> bool {
                    let $v = self;
                    $zero
                }
            }
        )*
    };
}

scalar_value! {
    bool => |v| !*v,
    char => |v| *v == '\0',
    i8 => |v| *v == 0,
    i16 => |v| *v == 0,
    i32 => |v| *v == 0,
    i64 => |v| *v == 0,
    i128 => |v| *v == 0,
    isize => |v| *v == 0,
    u8 => |v| *v == 0,
    u16 => |v| *v == 0,
    u32 => |v| *v == 0,
    u64 => |v| *v == 0,
    u128 => |v| *v == 0,
    usize => |v| *v == 0,
    f32 => |v| *v == 0.0,
    f64 => |v| *v == 0.0,
}

macro_rules! nonzero_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl QueryValue for $ty {
                fn resolve(&self) -> Resolved<'_> {
                    Resolved::Scalar(self)
                }

                fn is_zero(&self) -> bool {
                    false
                }
            }
        )*
    };
}

nonzero_value!(
    NonZeroI8,
    NonZeroI16,
    NonZeroI32,
    NonZeroI64,
    NonZeroU8,
    NonZeroU16,
    NonZeroU32,
    NonZeroU64,
    NonZeroUsize,
);

impl QueryValue for str {
    fn resolve(&self) -> Resolved<'_> {
        Resolved::Text(self)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl QueryValue for String {
    fn resolve(&self) -> Resolved<'_> {
        Resolved::Text(self)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl QueryValue for Cow<'_, str> {
    fn resolve(&self) -> Resolved<'_> {
        Resolved::Text(self)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: QueryValue> QueryValue for Option<T> {
    fn resolve(&self) -> Resolved<'_> {
        match self {
            Some(value) => value.resolve(),
            None => Resolved::Absent,
        }
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

macro_rules! deref_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<T: QueryValue + ?Sized> QueryValue for $ty {
                fn resolve(&self) -> Resolved<'_> {
                    (**self).resolve()
                }

                fn is_zero(&self) -> bool {
                    (**self).is_zero()
                }
            }
        )*
    };
}

deref_value!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

impl<T: QueryValue> QueryValue for [T] {
    fn resolve(&self) -> Resolved<'_> {
        Resolved::Sequence(self.iter().map(|v| v as &dyn QueryValue).collect())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: QueryValue, const N: usize> QueryValue for [T; N] {
    fn resolve(&self) -> Resolved<'_> {
        self.as_slice().resolve()
    }

    fn is_zero(&self) -> bool {
        self.iter().all(QueryValue::is_zero)
    }
}

impl<T: QueryValue> QueryValue for Vec<T> {
    fn resolve(&self) -> Resolved<'_> {
        self.as_slice().resolve()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: QueryValue> QueryValue for VecDeque<T> {
    fn resolve(&self) -> Resolved<'_> {
        Resolved::Sequence(self.iter().map(|v| v as &dyn QueryValue).collect())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: QueryValue> QueryValue for BTreeSet<T> {
    fn resolve(&self) -> Resolved<'_> {
        Resolved::Sequence(self.iter().map(|v| v as &dyn QueryValue).collect())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> QueryValue for HashMap<K, V, S> {
    fn resolve(&self) -> Resolved<'_> {
        Resolved::Unsupported(ValueKind::Map)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> QueryValue for BTreeMap<K, V> {
    fn resolve(&self) -> Resolved<'_> {
        Resolved::Unsupported(ValueKind::Map)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

macro_rules! unsupported_value {
    ($kind:expr => $(impl<$($param:ident),*> $ty:ty),* $(,)?) => {
        $(
            impl<$($param),*> QueryValue for $ty {
                fn resolve(&self) -> Resolved<'_> {
                    Resolved::Unsupported($kind)
                }

                fn is_zero(&self) -> bool {
                    false
                }
            }
        )*
    };
}

unsupported_value!(ValueKind::Callable =>
    impl<R> fn() -> R,
    impl<A, R> fn(A) -> R,
    impl<A, B, R> fn(A, B) -> R,
    impl<A, B, C, R> fn(A, B, C) -> R,
);

unsupported_value!(ValueKind::Channel =>
    impl<T> Sender<T>,
    impl<T> SyncSender<T>,
    impl<T> Receiver<T>,
);

impl<T: ?Sized> QueryValue for NonNull<T> {
    fn resolve(&self) -> Resolved<'_> {
        Resolved::Unsupported(ValueKind::RawPointer)
    }

    fn is_zero(&self) -> bool {
        false
    }
}

impl<T: ?Sized> QueryValue for *const T {
    fn resolve(&self) -> Resolved<'_> {
        Resolved::Unsupported(ValueKind::RawPointer)
    }

    fn is_zero(&self) -> bool {
        self.is_null()
    }
}

impl<T: ?Sized> QueryValue for *mut T {
    fn resolve(&self) -> Resolved<'_> {
        Resolved::Unsupported(ValueKind::RawPointer)
    }

    fn is_zero(&self) -> bool {
        self.is_null()
    }
}

#[cfg(feature = "uuid")]
impl QueryValue for uuid::Uuid {
    fn resolve(&self) -> Resolved<'_> {
        Resolved::Scalar(self)
    }

    fn is_zero(&self) -> bool {
        self.is_nil()
    }
}

#[cfg(feature = "chrono")]
mod chrono_values {
    use super::{QueryValue, Resolved};
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

    macro_rules! default_zero_value {
        ($($ty:ty),* $(,)?) => {
            $(
                impl QueryValue for $ty {
                    fn resolve(&self) -> Resolved<'_> {
                        Resolved::Scalar(self)
                    }

                    fn is_zero(&self) -> bool {
                        *self == <$ty>::default()
                    }
                }
            )*
        };
    }

    default_zero_value!(DateTime<Utc>, NaiveDate, NaiveDateTime);
}
