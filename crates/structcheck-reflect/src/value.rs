use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{DateTime, Utc};

use crate::descriptor::Reflect;

/// The concrete categories a field value can resolve to.
///
/// `Kind` describes the *static* declared type of a field (for an
/// `Option<T>` field this is the kind of `T`); the runtime counterpart is
/// [`FieldValue`], which adds the absent terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// UTF-8 text.
    String,
    /// Signed integers up to 64 bits.
    Int,
    /// Unsigned integers up to 64 bits.
    Uint,
    /// 32- or 64-bit floating point.
    Float,
    /// Booleans.
    Bool,
    /// A point in time (`chrono::DateTime<Utc>`).
    Timestamp,
    /// An ordered sequence of values.
    List,
    /// A string-keyed mapping.
    Map,
    /// A nested record with its own descriptor.
    Record,
}

impl Kind {
    /// The lowercase name used in composite translation keys such as
    /// `"min-string"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Bool => "bool",
            Kind::Timestamp => "timestamp",
            Kind::List => "list",
            Kind::Map => "map",
            Kind::Record => "record",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field value with every layer of indirection already unwrapped.
///
/// Optionals and boxes never appear here: `Option<T>` resolves to either
/// [`FieldValue::Absent`] or the resolved value of its payload, through any
/// number of nesting layers.
pub enum FieldValue<'a> {
    /// A `None` optional at any depth of nesting.
    Absent,
    /// Borrowed string data.
    String(&'a str),
    /// Signed integer, widened to 64 bits.
    Int(i64),
    /// Unsigned integer, widened to 64 bits.
    Uint(u64),
    /// Floating point, widened to 64 bits.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// A point in time.
    Timestamp(DateTime<Utc>),
    /// Sequence elements, in sequence order.
    List(Vec<FieldValue<'a>>),
    /// Map entries, in ascending key order so traversal is deterministic.
    Map(Vec<(&'a str, FieldValue<'a>)>),
    /// A nested record.
    Record(&'a dyn Reflect),
}

impl FieldValue<'_> {
    /// The resolved kind, or `None` for the absent terminal.
    #[must_use]
    pub fn kind(&self) -> Option<Kind> {
        match self {
            FieldValue::Absent => None,
            FieldValue::String(_) => Some(Kind::String),
            FieldValue::Int(_) => Some(Kind::Int),
            FieldValue::Uint(_) => Some(Kind::Uint),
            FieldValue::Float(_) => Some(Kind::Float),
            FieldValue::Bool(_) => Some(Kind::Bool),
            FieldValue::Timestamp(_) => Some(Kind::Timestamp),
            FieldValue::List(_) => Some(Kind::List),
            FieldValue::Map(_) => Some(Kind::Map),
            FieldValue::Record(_) => Some(Kind::Record),
        }
    }

    /// The resolved kind name, with `"absent"` for the absent terminal.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        self.kind().map_or("absent", Kind::as_str)
    }

    /// Returns true for the absent terminal.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Absent => f.write_str("Absent"),
            FieldValue::String(v) => f.debug_tuple("String").field(v).finish(),
            FieldValue::Int(v) => f.debug_tuple("Int").field(v).finish(),
            FieldValue::Uint(v) => f.debug_tuple("Uint").field(v).finish(),
            FieldValue::Float(v) => f.debug_tuple("Float").field(v).finish(),
            FieldValue::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            FieldValue::Timestamp(v) => f.debug_tuple("Timestamp").field(v).finish(),
            FieldValue::List(v) => f.debug_tuple("List").field(v).finish(),
            FieldValue::Map(v) => f.debug_tuple("Map").field(v).finish(),
            FieldValue::Record(v) => f
                .debug_tuple("Record")
                .field(&v.descriptor().name)
                .finish(),
        }
    }
}

/// Conversion from a concrete field type to its [`FieldValue`].
///
/// `KIND` is the static declared kind consulted for message translation;
/// for wrapper types (`Option`, `Box`) it is the kind of the payload.
pub trait AsFieldValue {
    /// The static declared kind of this type.
    const KIND: Kind;

    /// Resolve a borrowed value, unwrapping indirection layers.
    fn as_field_value(&self) -> FieldValue<'_>;
}

macro_rules! int_as_field_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl AsFieldValue for $ty {
                const KIND: Kind = Kind::Int;

                fn as_field_value(&self) -> FieldValue<'_> {
                    FieldValue::Int(*self as i64)
                }
            }
        )*
    };
}

macro_rules! uint_as_field_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl AsFieldValue for $ty {
                const KIND: Kind = Kind::Uint;

                fn as_field_value(&self) -> FieldValue<'_> {
                    FieldValue::Uint(*self as u64)
                }
            }
        )*
    };
}

int_as_field_value!(i8, i16, i32, i64, isize);
uint_as_field_value!(u8, u16, u32, u64, usize);

impl AsFieldValue for f32 {
    const KIND: Kind = Kind::Float;

    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Float(f64::from(*self))
    }
}

impl AsFieldValue for f64 {
    const KIND: Kind = Kind::Float;

    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Float(*self)
    }
}

impl AsFieldValue for bool {
    const KIND: Kind = Kind::Bool;

    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Bool(*self)
    }
}

impl AsFieldValue for String {
    const KIND: Kind = Kind::String;

    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::String(self.as_str())
    }
}

impl AsFieldValue for DateTime<Utc> {
    const KIND: Kind = Kind::Timestamp;

    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Timestamp(*self)
    }
}

impl<T: AsFieldValue> AsFieldValue for Option<T> {
    const KIND: Kind = T::KIND;

    fn as_field_value(&self) -> FieldValue<'_> {
        match self {
            Some(value) => value.as_field_value(),
            None => FieldValue::Absent,
        }
    }
}

impl<T: AsFieldValue> AsFieldValue for Box<T> {
    const KIND: Kind = T::KIND;

    fn as_field_value(&self) -> FieldValue<'_> {
        (**self).as_field_value()
    }
}

impl<T: AsFieldValue> AsFieldValue for Vec<T> {
    const KIND: Kind = Kind::List;

    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::List(self.iter().map(AsFieldValue::as_field_value).collect())
    }
}

impl<T: AsFieldValue> AsFieldValue for HashMap<String, T> {
    const KIND: Kind = Kind::Map;

    fn as_field_value(&self) -> FieldValue<'_> {
        let mut entries: Vec<(&str, FieldValue<'_>)> = self
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_field_value()))
            .collect();
        // Hash maps iterate in arbitrary order; traversal must not.
        entries.sort_by_key(|&(key, _)| key);
        FieldValue::Map(entries)
    }
}

impl<T: AsFieldValue> AsFieldValue for BTreeMap<String, T> {
    const KIND: Kind = Kind::Map;

    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Map(
            self.iter()
                .map(|(key, value)| (key.as_str(), value.as_field_value()))
                .collect(),
        )
    }
}
