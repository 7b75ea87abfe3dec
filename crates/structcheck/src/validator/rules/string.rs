//! String-only predicates.

use std::sync::LazyLock;

use regex::Regex;

use structcheck_reflect::FieldValue;

use crate::error::RuleError;

use super::params;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$")
        .expect("email regex must compile")
});

/// `email`: the value matches the standard email pattern.
pub(crate) fn email(rule: &str, value: &FieldValue<'_>) -> Result<bool, RuleError> {
    match value {
        FieldValue::String(text) => Ok(EMAIL_REGEX.is_match(text)),
        other => Err(RuleError::unsupported_kind(rule, other.kind_name())),
    }
}

/// `boolean`: the value parses as one of the boolean literals.
pub(crate) fn boolean(rule: &str, value: &FieldValue<'_>) -> Result<bool, RuleError> {
    match value {
        FieldValue::String(text) => Ok(params::parse_bool_literal(text).is_some()),
        other => Err(RuleError::unsupported_kind(rule, other.kind_name())),
    }
}
