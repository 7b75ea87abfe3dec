//! Equality, length, and ordering predicates.

use std::cmp::Ordering;

use structcheck_reflect::FieldValue;

use crate::config::ValidationConfig;
use crate::error::RuleError;

use super::params;

/// `eq`: string equality, element-count equality for collections,
/// numeric or boolean equality for scalars.
pub(crate) fn eq(rule: &str, value: &FieldValue<'_>, param: &str) -> Result<bool, RuleError> {
    match value {
        FieldValue::String(text) => Ok(*text == param),
        FieldValue::List(items) => Ok(count_matches(rule, items.len(), param)?),
        FieldValue::Map(entries) => Ok(count_matches(rule, entries.len(), param)?),
        FieldValue::Int(v) => Ok(*v == params::as_int(rule, param)?),
        FieldValue::Uint(v) => Ok(*v == params::as_uint(rule, param)?),
        FieldValue::Float(v) => Ok(*v == params::as_float(rule, param)?),
        FieldValue::Bool(v) => Ok(*v == params::as_bool(rule, param)?),
        other => Err(RuleError::unsupported_kind(rule, other.kind_name())),
    }
}

/// `len`: rune count for strings, element count for collections, value
/// equality for numbers.
pub(crate) fn length(rule: &str, value: &FieldValue<'_>, param: &str) -> Result<bool, RuleError> {
    match value {
        FieldValue::String(text) => {
            Ok(rune_count(text) == params::as_int(rule, param)?)
        }
        FieldValue::List(items) => Ok(count_matches(rule, items.len(), param)?),
        FieldValue::Map(entries) => Ok(count_matches(rule, entries.len(), param)?),
        FieldValue::Int(v) => Ok(*v == params::as_int(rule, param)?),
        FieldValue::Uint(v) => Ok(*v == params::as_uint(rule, param)?),
        FieldValue::Float(v) => Ok(*v == params::as_float(rule, param)?),
        other => Err(RuleError::unsupported_kind(rule, other.kind_name())),
    }
}

/// The shared core of `lt`/`lte`/`gt`/`gte` (and the `min`/`max`
/// aliases): compare the measured value against the parameter and accept
/// the orderings the rule allows. Strings measure their rune count,
/// collections their element count, timestamps compare against the
/// configured `now` with the parameter ignored.
pub(crate) fn ordering(
    rule: &str,
    value: &FieldValue<'_>,
    param: &str,
    config: &ValidationConfig,
    accept: fn(Ordering) -> bool,
) -> Result<bool, RuleError> {
    let ordering = match value {
        FieldValue::String(text) => rune_count(text).cmp(&params::as_int(rule, param)?),
        FieldValue::List(items) => count_of(items.len()).cmp(&params::as_int(rule, param)?),
        FieldValue::Map(entries) => count_of(entries.len()).cmp(&params::as_int(rule, param)?),
        FieldValue::Int(v) => v.cmp(&params::as_int(rule, param)?),
        FieldValue::Uint(v) => v.cmp(&params::as_uint(rule, param)?),
        FieldValue::Float(v) => match v.partial_cmp(&params::as_float(rule, param)?) {
            Some(ordering) => ordering,
            // NaN satisfies no ordering rule.
            None => return Ok(false),
        },
        FieldValue::Timestamp(at) => at.cmp(&(config.now_fn)()),
        other => return Err(RuleError::unsupported_kind(rule, other.kind_name())),
    };
    Ok(accept(ordering))
}

fn count_matches(rule: &str, count: usize, param: &str) -> Result<bool, RuleError> {
    Ok(count_of(count) == params::as_int(rule, param)?)
}

fn count_of(count: usize) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

fn rune_count(text: &str) -> i64 {
    count_of(text.chars().count())
}
