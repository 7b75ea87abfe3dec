//! Tag-driven validation for plain Rust structs.
//!
//! Fields carry short textual rule tags (`"required,min=1,oneof=1 2"`);
//! the engine walks the record graph in declaration order — through
//! optionals, nested records, sequences, and maps — evaluates each
//! field's rules, and reports the *first* violated rule as a localized,
//! parameterized message.
//!
//! # Quick start
//!
//! Describe a record with the [`record!`] macro, then validate it:
//!
//! ```rust
//! use structcheck::{validate, Error};
//!
//! structcheck::record! {
//!     #[derive(Debug, Default)]
//!     pub struct Signup {
//!         fname: String => { validate = "required", desc = "姓氏" },
//!         age: u8 => { validate = "gte=0,lte=100", desc = "年龄" },
//!     }
//! }
//!
//! let signup = Signup { fname: String::new(), age: 30 };
//! match validate(&signup) {
//!     Err(Error::Validation(err)) => {
//!         assert_eq!(err.violation().message(), "姓氏为必填字段");
//!     }
//!     other => panic!("expected a validation failure, got {other:?}"),
//! }
//! ```
//!
//! For custom tag keys, translations, or a fixed time source, construct
//! a [`Validator`] and keep it around — its caches are shared across
//! calls:
//!
//! ```rust
//! use structcheck::{Validator, ValidatorOption};
//!
//! let validator = Validator::with_options(&[
//!     ValidatorOption::RuleTag("rules".into()),
//! ]);
//! # let _ = validator;
//! ```
//!
//! # Error types
//!
//! | Type | When |
//! |------|------|
//! | [`ValidationError`] | A field value violated one of its rules |
//! | [`RuleError`] | The rule tags or engine configuration are broken |
//!
//! Both are unified under [`Error`], which also carries decode failures
//! from [`Validator::bind_and_validate`]. The two classes are disjoint
//! on purpose: invalid input never reads as an engine defect, and a
//! broken rule set never reads as "valid".

#![warn(missing_docs)]

mod binding;
mod config;
mod error;
mod translate;
mod validator;
mod violation;

/// Re-export of the descriptor layer so consumers do not need to depend
/// on `structcheck-reflect` directly.
pub use structcheck_reflect as reflect;

pub use structcheck_reflect::record;
pub use structcheck_reflect::{AsFieldValue, FieldDescriptor, FieldValue, Kind, RecordDescriptor, Reflect};

pub use config::ValidatorOption;
pub use error::{Error, RuleError, ValidationError};
pub use translate::TranslationTable;
pub use validator::{validate, Validator};
pub use violation::Violation;
