//! The `oneof` membership predicate and its candidate cache.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use regex::Regex;

use structcheck_reflect::FieldValue;

use crate::error::RuleError;

/// Candidates are whitespace-separated; single-quoted tokens may contain
/// spaces and have their quotes stripped.
static SPLIT_PARAMS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("'[^']*'|\\S+").expect("oneof split regex must compile"));

/// Read-mostly cache of split candidate lists, keyed by the raw
/// parameter string. Owned by the validator instance and shared across
/// concurrent validation calls.
#[derive(Default)]
pub(crate) struct OneofCache {
    values: RwLock<HashMap<String, Arc<Vec<String>>>>,
}

impl OneofCache {
    fn candidates(&self, param: &str) -> Arc<Vec<String>> {
        if let Some(cached) = self
            .values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(param)
        {
            return Arc::clone(cached);
        }

        let split: Arc<Vec<String>> = Arc::new(
            SPLIT_PARAMS_REGEX
                .find_iter(param)
                .map(|candidate| candidate.as_str().replace('\'', ""))
                .collect(),
        );
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(param.to_string(), Arc::clone(&split));
        split
    }
}

/// `oneof`: the value's string form is one of the candidates.
pub(crate) fn one_of(
    rule: &str,
    value: &FieldValue<'_>,
    param: &str,
    cache: &OneofCache,
) -> Result<bool, RuleError> {
    let formatted = match value {
        FieldValue::String(text) => (*text).to_string(),
        FieldValue::Int(v) => v.to_string(),
        FieldValue::Uint(v) => v.to_string(),
        other => return Err(RuleError::unsupported_kind(rule, other.kind_name())),
    };
    Ok(cache
        .candidates(param)
        .iter()
        .any(|candidate| *candidate == formatted))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{one_of, OneofCache};
    use structcheck_reflect::FieldValue;

    #[test]
    fn integers_match_by_decimal_form() {
        let cache = OneofCache::default();
        assert!(one_of("oneof", &FieldValue::Int(1), "1 2", &cache).unwrap());
        assert!(one_of("oneof", &FieldValue::Int(2), "1 2", &cache).unwrap());
        assert!(!one_of("oneof", &FieldValue::Int(3), "1 2", &cache).unwrap());
        assert!(one_of("oneof", &FieldValue::Uint(2), "1 2", &cache).unwrap());
    }

    #[test]
    fn quoted_candidates_keep_their_spaces() {
        let cache = OneofCache::default();
        let param = "'north america' europe";
        assert!(one_of("oneof", &FieldValue::String("north america"), param, &cache).unwrap());
        assert!(one_of("oneof", &FieldValue::String("europe"), param, &cache).unwrap());
        assert!(!one_of("oneof", &FieldValue::String("north"), param, &cache).unwrap());
    }

    #[test]
    fn the_cache_returns_the_same_list_for_a_repeated_parameter() {
        let cache = OneofCache::default();
        let first = cache.candidates("red green blue");
        let second = cache.candidates("red green blue");
        assert!(std::sync::Arc::ptr_eq(&first, &second));
        assert_eq!(*first, vec!["red", "green", "blue"]);
    }

    #[test]
    fn unsupported_kinds_are_engine_errors() {
        let cache = OneofCache::default();
        assert!(one_of("oneof", &FieldValue::Float(1.0), "1 2", &cache).is_err());
        assert!(one_of("oneof", &FieldValue::Bool(true), "true", &cache).is_err());
    }
}
