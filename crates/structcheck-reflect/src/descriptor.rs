use crate::value::{FieldValue, Kind};

/// Compile-time metadata for one field of a record.
///
/// Instances are generated by the [`record!`](crate::record) macro and live
/// in `static` tables, so every reference is `'static`.
#[derive(Debug)]
pub struct FieldDescriptor {
    /// The field's declared name.
    pub name: &'static str,

    /// The field's static declared kind. For `Option<T>` fields this is
    /// the kind of `T`.
    pub kind: Kind,

    /// Free-form tag key/value pairs attached to the field.
    pub tags: &'static [(&'static str, &'static str)],
}

impl FieldDescriptor {
    /// Look up a tag value by key.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|&&(tag_key, _)| tag_key == key)
            .map(|&(_, value)| value)
    }
}

/// Compile-time metadata for a record type: its name and its fields in
/// declaration order.
#[derive(Debug)]
pub struct RecordDescriptor {
    /// The record type's name.
    pub name: &'static str,

    /// Field descriptors in declaration order.
    pub fields: &'static [FieldDescriptor],
}

/// Runtime access to a record's fields through its descriptor.
///
/// Implemented by the [`record!`](crate::record) macro; the generated
/// descriptor table is built once at compile time and `get` resolves the
/// field at `index` to a [`FieldValue`] with indirection unwrapped.
pub trait Reflect {
    /// The descriptor for this record type.
    fn descriptor(&self) -> &'static RecordDescriptor;

    /// The resolved value of the field at `index` (declaration order).
    /// Out-of-range indexes resolve to [`FieldValue::Absent`].
    fn get(&self, index: usize) -> FieldValue<'_>;
}
