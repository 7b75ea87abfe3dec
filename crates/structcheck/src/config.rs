use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::translate::TranslationTable;

pub(crate) const DEFAULT_RULE_TAG: &str = "validate";
pub(crate) const DEFAULT_DESCRIBE_TAG: &str = "desc";
pub(crate) const DEFAULT_OPTIONAL_MARKER: &str = "omitempty";

/// The whole-tag literal that disables validation for a field.
pub(crate) const SKIP_TAG: &str = "-";

/// Options for configuring the `Validator` at construction time.
#[non_exhaustive]
pub enum ValidatorOption {
    /// Tag key carrying the rule list. Defaults to `"validate"`.
    RuleTag(String),

    /// Tag key carrying the human-readable field description. Defaults to
    /// `"desc"`.
    DescribeTag(String),

    /// Rule-slot literal that switches a field into optional-validation
    /// mode. Defaults to `"omitempty"`.
    OptionalMarker(String),

    /// Replace the message template table wholesale.
    Translations(TranslationTable),

    /// Override the function used as `now` in time-relative rules.
    NowFn(Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>),
}

/// The tag keys consulted on field descriptors.
#[derive(Debug, Clone)]
pub(crate) struct TagKeys {
    pub rule: String,
    pub describe: String,
    pub optional_marker: String,
}

impl Default for TagKeys {
    fn default() -> Self {
        Self {
            rule: DEFAULT_RULE_TAG.to_string(),
            describe: DEFAULT_DESCRIBE_TAG.to_string(),
            optional_marker: DEFAULT_OPTIONAL_MARKER.to_string(),
        }
    }
}

/// Runtime configuration handed to the walker during one validation pass.
pub(crate) struct ValidationConfig {
    pub tags: TagKeys,
    pub now_fn: Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>,
}

/// Default timestamp factory, shared by `ValidationConfig::default()` and
/// `Validator::with_options()`.
pub(crate) fn default_now_fn() -> Arc<dyn Fn() -> DateTime<Utc> + Send + Sync> {
    Arc::new(Utc::now)
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            tags: TagKeys::default(),
            now_fn: default_now_fn(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{TagKeys, ValidationConfig};

    #[test]
    fn default_tag_keys_match_the_documented_names() {
        let keys = TagKeys::default();
        assert_eq!(keys.rule, "validate");
        assert_eq!(keys.describe, "desc");
        assert_eq!(keys.optional_marker, "omitempty");
    }

    #[test]
    fn default_now_fn_produces_current_timestamps() {
        let config = ValidationConfig::default();
        let before = chrono::Utc::now();
        let now = (config.now_fn)();
        let after = chrono::Utc::now();
        assert!(before <= now && now <= after);
    }
}
