//! Compile-time descriptor tables for tag-driven struct validation.
//!
//! Rust has no runtime reflection, so the validation engine consults a
//! descriptor table generated at compile time instead: the [`record!`]
//! macro wraps an ordinary struct definition, records each field's name,
//! static [`Kind`] and tag key/value pairs in a `static`
//! [`RecordDescriptor`], and implements [`Reflect`] so the engine can
//! resolve field values generically.
//!
//! ```rust
//! use structcheck_reflect::{FieldValue, Kind, Reflect};
//!
//! structcheck_reflect::record! {
//!     #[derive(Debug, Default)]
//!     pub struct Account {
//!         name: String => { validate = "required", desc = "账户名" },
//!         age: u32 => { validate = "gte=0,lte=100" },
//!         nickname: Option<String>,
//!     }
//! }
//!
//! let account = Account { name: "ada".into(), age: 30, nickname: None };
//! let descriptor = account.descriptor();
//! assert_eq!(descriptor.name, "Account");
//! assert_eq!(descriptor.fields[0].tag("desc"), Some("账户名"));
//! assert_eq!(descriptor.fields[2].kind, Kind::String);
//! assert!(matches!(account.get(1), FieldValue::Uint(30)));
//! assert!(account.get(2).is_absent());
//! ```

#![warn(missing_docs)]

mod descriptor;
mod value;

pub use descriptor::{FieldDescriptor, RecordDescriptor, Reflect};
pub use value::{AsFieldValue, FieldValue, Kind};

/// Define a struct together with its generated [`Reflect`] implementation.
///
/// Each field may carry a trailing `=> { key = "value", ... }` block of
/// tags; the engine reads its configured rule and description keys from
/// them. Ordinary attributes (derives, `#[serde(...)]`) pass through
/// unchanged. The macro also implements [`AsFieldValue`] for the struct so
/// it can appear as a nested field, a sequence element, or a map value of
/// another record.
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $fname:ident : $fty:ty
                $(=> { $($ckey:ident = $cval:literal),* $(,)? })?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $fname: $fty,
            )*
        }

        impl $crate::Reflect for $name {
            fn descriptor(&self) -> &'static $crate::RecordDescriptor {
                static FIELDS: &[$crate::FieldDescriptor] = &[
                    $(
                        $crate::FieldDescriptor {
                            name: stringify!($fname),
                            kind: <$fty as $crate::AsFieldValue>::KIND,
                            tags: &[$($( (stringify!($ckey), $cval) ),*)?],
                        },
                    )*
                ];
                static DESCRIPTOR: $crate::RecordDescriptor = $crate::RecordDescriptor {
                    name: stringify!($name),
                    fields: FIELDS,
                };
                &DESCRIPTOR
            }

            fn get(&self, index: usize) -> $crate::FieldValue<'_> {
                let mut current = 0usize;
                $(
                    if index == current {
                        return $crate::AsFieldValue::as_field_value(&self.$fname);
                    }
                    current += 1;
                )*
                let _ = current;
                $crate::FieldValue::Absent
            }
        }

        impl $crate::AsFieldValue for $name {
            const KIND: $crate::Kind = $crate::Kind::Record;

            fn as_field_value(&self) -> $crate::FieldValue<'_> {
                $crate::FieldValue::Record(self)
            }
        }
    };
}
