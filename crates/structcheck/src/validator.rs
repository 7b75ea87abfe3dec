use std::sync::{Arc, LazyLock};

use structcheck_reflect::Reflect;

use crate::config::{default_now_fn, TagKeys, ValidationConfig, ValidatorOption};
use crate::error::Error;
use crate::translate::{self, TranslationTable};

pub(crate) mod rules;
pub(crate) mod tags;
pub(crate) mod walker;

use rules::one_of::OneofCache;
use walker::Walk;

/// Thread-safe validation engine.
///
/// Walks a record's field graph, evaluates each field's rule tag, and
/// reports the first violated rule as a translated message. The engine
/// holds only read-mostly state (tag keys, templates, the `oneof`
/// candidate cache), so one instance can serve concurrent calls.
pub struct Validator {
    config: ValidationConfig,
    translations: TranslationTable,
    oneof_cache: OneofCache,
}

impl Validator {
    /// Create a new `Validator` with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(&[])
    }

    /// Create a new `Validator` with the given options.
    #[must_use]
    pub fn with_options(options: &[ValidatorOption]) -> Self {
        let mut tags = TagKeys::default();
        let mut translations = TranslationTable::default();
        let mut now_fn = default_now_fn();

        for option in options {
            match option {
                ValidatorOption::RuleTag(key) => tags.rule.clone_from(key),
                ValidatorOption::DescribeTag(key) => tags.describe.clone_from(key),
                ValidatorOption::OptionalMarker(key) => tags.optional_marker.clone_from(key),
                ValidatorOption::Translations(table) => translations = table.clone(),
                ValidatorOption::NowFn(f) => now_fn = Arc::clone(f),
            }
        }

        Self {
            config: ValidationConfig {
                tags,
                now_fn,
            },
            translations,
            oneof_cache: OneofCache::default(),
        }
    }

    /// Validate a record against its rule tags.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] carrying the first violated rule,
    /// rendered through the translation table, or [`Error::Rule`] when
    /// the rule tags or the engine configuration are broken.
    pub fn validate<R: Reflect>(&self, value: &R) -> Result<(), Error> {
        let walk = Walk {
            config: &self.config,
            oneof: &self.oneof_cache,
        };
        match walk.record(value) {
            Ok(()) => Ok(()),
            Err(Error::Validation(mut err)) => {
                let message = translate::render(err.violation(), &self.translations)?;
                err.violation_mut().set_message(message);
                Err(Error::Validation(err))
            }
            Err(other) => Err(other),
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_VALIDATOR: LazyLock<Validator> = LazyLock::new(Validator::new);

/// Validate a record using a shared default `Validator` instance.
///
/// This is a convenience function backed by a lazily-initialized global
/// validator. Construct a [`Validator`] explicitly to configure tag keys,
/// translations, or the time source.
///
/// # Errors
///
/// Returns [`Error::Validation`] carrying the first violated rule, or
/// [`Error::Rule`] when the rule tags themselves are broken.
pub fn validate<R: Reflect>(value: &R) -> Result<(), Error> {
    GLOBAL_VALIDATOR.validate(value)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeDelta, Utc};
    use pretty_assertions::assert_eq;

    use super::{validate, Validator};
    use crate::config::ValidatorOption;
    use crate::error::Error;
    use crate::translate::TranslationTable;

    structcheck_reflect::record! {
        #[derive(Debug, Default)]
        struct Person {
            fname: String => { validate = "required", desc = "姓氏" },
            job: Option<String> => { validate = "required", desc = "工作" },
            age: u8 => { validate = "omitempty,gte=0,lte=100", desc = "年龄" },
        }
    }

    fn person(fname: &str, job: Option<&str>, age: u8) -> Person {
        Person {
            fname: fname.into(),
            job: job.map(str::to_string),
            age,
        }
    }

    fn expect_message(result: Result<(), Error>) -> String {
        match result {
            Err(Error::Validation(err)) => err.violation().message().to_string(),
            other => panic!("expected a validation failure, got {other:?}"),
        }
    }

    #[test]
    fn valid_records_pass_through_the_global_validator() {
        assert!(validate(&person("li", Some("engineer"), 30)).is_ok());
    }

    #[test]
    fn the_first_failure_in_declaration_order_is_translated() {
        // Both fname and job are invalid; fname is declared first.
        let message = expect_message(validate(&person("", None, 30)));
        assert_eq!(message, "姓氏为必填字段");
    }

    #[test]
    fn comparison_failures_render_with_their_parameter() {
        let message = expect_message(validate(&person("li", Some("engineer"), 150)));
        assert_eq!(message, "年龄必须小于或等于100");
    }

    #[test]
    fn custom_tag_keys_are_honored() {
        structcheck_reflect::record! {
            #[derive(Debug, Default)]
            struct Renamed {
                // Rules live under `rules`, the description under `label`.
                name: String => { rules = "required", label = "名称", validate = "ignored" },
            }
        }

        let validator = Validator::with_options(&[
            ValidatorOption::RuleTag("rules".into()),
            ValidatorOption::DescribeTag("label".into()),
        ]);
        let message = expect_message(validator.validate(&Renamed::default()));
        assert_eq!(message, "名称为必填字段");
    }

    #[test]
    fn custom_optional_marker_is_honored() {
        structcheck_reflect::record! {
            #[derive(Debug, Default)]
            struct Marked {
                count: u32 => { validate = "maybe,gte=1" },
            }
        }

        let validator =
            Validator::with_options(&[ValidatorOption::OptionalMarker("maybe".into())]);
        assert!(validator.validate(&Marked {
            count: 0,
        })
        .is_ok());
        assert!(validator.validate(&Marked {
            count: 5,
        })
        .is_ok());
    }

    #[test]
    fn replacing_the_translation_table_changes_messages() {
        let mut table = TranslationTable::empty();
        table.insert("required", "{0} is required");

        let validator = Validator::with_options(&[ValidatorOption::Translations(table)]);
        let message = expect_message(validator.validate(&person("", None, 30)));
        assert_eq!(message, "姓氏 is required");
    }

    #[test]
    fn injected_now_fn_drives_timestamp_rules() {
        structcheck_reflect::record! {
            #[derive(Debug)]
            struct Ticket {
                expires: chrono::DateTime<chrono::Utc> => { validate = "gt", desc = "有效期" },
            }
        }

        let expires = Utc::now();
        let ticket = Ticket {
            expires,
        };

        let in_the_past = Arc::new(move || expires - TimeDelta::hours(1));
        let validator = Validator::with_options(&[ValidatorOption::NowFn(in_the_past)]);
        assert!(validator.validate(&ticket).is_ok());

        let in_the_future = Arc::new(move || expires + TimeDelta::hours(1));
        let validator = Validator::with_options(&[ValidatorOption::NowFn(in_the_future)]);
        let message = expect_message(validator.validate(&ticket));
        assert_eq!(message, "有效期必须晚于当前时间");
    }

    #[test]
    fn oneof_accepts_listed_integers_only() {
        structcheck_reflect::record! {
            #[derive(Debug, Default)]
            struct Choice {
                picked: i64 => { validate = "oneof=1 2", desc = "选项" },
            }
        }

        let validator = Validator::new();
        assert!(validator.validate(&Choice { picked: 1 }).is_ok());
        assert!(validator.validate(&Choice { picked: 2 }).is_ok());

        let message = expect_message(validator.validate(&Choice { picked: 3 }));
        assert_eq!(message, "选项必须是[1 2]中的一个");
    }

    #[test]
    fn translation_failures_surface_as_rule_errors() {
        let validator =
            Validator::with_options(&[ValidatorOption::Translations(TranslationTable::empty())]);
        match validator.validate(&person("", None, 30)) {
            Err(Error::Rule(err)) => assert!(err.cause.contains("no message template")),
            other => panic!("expected a rule error, got {other:?}"),
        }
    }

    #[test]
    fn validators_are_shareable_across_threads() {
        let validator = Arc::new(Validator::new());
        let handles: Vec<_> = (0..4u8)
            .map(|i| {
                let validator = Arc::clone(&validator);
                std::thread::spawn(move || {
                    let valid = validator.validate(&person("li", Some("engineer"), 30));
                    let invalid = validator.validate(&person("", None, i));
                    (valid.is_ok(), invalid.is_err())
                })
            })
            .collect();
        for handle in handles {
            let (valid, invalid) = handle.join().expect("thread must not panic");
            assert!(valid && invalid);
        }
    }
}
