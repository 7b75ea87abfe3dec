//! The built-in rule table.
//!
//! Each predicate receives the resolved value and the raw parameter and
//! answers "rule satisfied". A predicate asked about a kind outside its
//! domain returns a [`RuleError`], keeping "the data is invalid" apart
//! from "this rule cannot apply here".

pub(crate) mod compare;
pub(crate) mod one_of;
pub(crate) mod params;
pub(crate) mod string;

use std::cmp::Ordering;

use structcheck_reflect::FieldValue;

use crate::config::ValidationConfig;
use crate::error::RuleError;

use one_of::OneofCache;

/// Evaluate one rule invocation against a resolved value. `Ok(true)`
/// means the rule is satisfied; `Err` means the rule set itself is
/// broken.
pub(crate) fn evaluate(
    name: &str,
    value: &FieldValue<'_>,
    param: &str,
    config: &ValidationConfig,
    cache: &OneofCache,
) -> Result<bool, RuleError> {
    // `required` is the only rule defined on absent values; measuring or
    // comparing an absent value is undefined.
    if value.is_absent() && name != "required" {
        return Err(RuleError::unsupported_kind(name, value.kind_name()));
    }

    match name {
        "required" => Ok(has_value(value)),
        "len" => compare::length(name, value, param),
        "eq" => compare::eq(name, value, param),
        "ne" => compare::eq(name, value, param).map(|equal| !equal),
        "lt" => compare::ordering(name, value, param, config, |o| o == Ordering::Less),
        "lte" | "max" => compare::ordering(name, value, param, config, |o| o != Ordering::Greater),
        "gt" => compare::ordering(name, value, param, config, |o| o == Ordering::Greater),
        "gte" | "min" => compare::ordering(name, value, param, config, |o| o != Ordering::Less),
        "email" => string::email(name, value),
        "boolean" => string::boolean(name, value),
        "oneof" => one_of::one_of(name, value, param, cache),
        _ => Err(RuleError::unknown_rule(name)),
    }
}

/// The `required` presence check, also the absent-or-zero test behind
/// the optional marker: strings must be non-empty, numbers non-zero;
/// booleans, timestamps, records, and collections count as present
/// whenever they exist at all.
pub(crate) fn has_value(value: &FieldValue<'_>) -> bool {
    match value {
        FieldValue::Absent => false,
        FieldValue::String(text) => !text.is_empty(),
        FieldValue::Int(v) => *v != 0,
        FieldValue::Uint(v) => *v != 0,
        FieldValue::Float(v) => *v != 0.0,
        FieldValue::Bool(_)
        | FieldValue::Timestamp(_)
        | FieldValue::List(_)
        | FieldValue::Map(_)
        | FieldValue::Record(_) => true,
    }
}
