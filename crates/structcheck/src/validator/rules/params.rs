//! Rule parameter parsing.
//!
//! Integer parameters are base-agnostic: an optional sign followed by a
//! `0x`/`0b`/`0o` radix prefix, a bare leading `0` for octal, or decimal
//! digits. A parameter that fails to parse where a rule needs a number is
//! a [`RuleError`], never a validation failure.

use crate::error::RuleError;

pub(crate) fn as_int(rule: &str, param: &str) -> Result<i64, RuleError> {
    parse_i64(param).ok_or_else(|| RuleError::bad_param(rule, param))
}

pub(crate) fn as_uint(rule: &str, param: &str) -> Result<u64, RuleError> {
    parse_u64(param).ok_or_else(|| RuleError::bad_param(rule, param))
}

pub(crate) fn as_float(rule: &str, param: &str) -> Result<f64, RuleError> {
    param
        .parse::<f64>()
        .map_err(|_| RuleError::bad_param(rule, param))
}

pub(crate) fn as_bool(rule: &str, param: &str) -> Result<bool, RuleError> {
    parse_bool_literal(param).ok_or_else(|| RuleError::bad_param(rule, param))
}

/// The accepted boolean literal set: `1 t T TRUE true True` and their
/// false counterparts.
pub(crate) fn parse_bool_literal(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn parse_i64(text: &str) -> Option<i64> {
    let (negative, magnitude_text) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let magnitude = parse_u64(magnitude_text)?;
    if negative {
        if magnitude > i64::MAX.unsigned_abs() + 1 {
            return None;
        }
        Some((magnitude as i64).wrapping_neg())
    } else {
        i64::try_from(magnitude).ok()
    }
}

fn parse_u64(text: &str) -> Option<u64> {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).ok()
    } else if let Some(binary) = text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
        u64::from_str_radix(binary, 2).ok()
    } else if let Some(octal) = text.strip_prefix("0o").or_else(|| text.strip_prefix("0O")) {
        u64::from_str_radix(octal, 8).ok()
    } else if text.len() > 1 && text.starts_with('0') {
        u64::from_str_radix(&text[1..], 8).ok()
    } else {
        text.parse::<u64>().ok()
    }
}
