//! Message translation for validation failures.
//!
//! A failed rule renders through a template table keyed by rule name,
//! falling back to `"{rule}-{kind}"` where the kind is the field's static
//! declared kind. Templates substitute `{0}` with the field's display
//! name and `{1}` with the rule parameter, first occurrence each.

use std::collections::HashMap;

use structcheck_reflect::Kind;

use crate::error::RuleError;
use crate::violation::Violation;

// {0} == the field's display name
// {1} == the rule parameter
const DEFAULT_TEMPLATES: &[(&str, &str)] = &[
    ("required", "{0}为必填字段"),
    ("eq", "{0}不等于{1}"),
    ("ne", "{0}不能等于{1}"),
    ("email", "{0}必须是一个有效的邮箱"),
    ("oneof", "{0}必须是[{1}]中的一个"),
    ("boolean", "{0}必须是有效的布尔值"),
    // len
    ("len-string", "{0}长度必须是{1}个字符"),
    ("len-int", "{0}必须等于{1}"),
    ("len-uint", "{0}必须等于{1}"),
    ("len-float", "{0}必须等于{1}"),
    ("len-list", "{0}必须包含{1}项"),
    ("len-map", "{0}必须包含{1}项"),
    // min
    ("min-string", "{0}长度必须至少为{1}个字符"),
    ("min-int", "{0}最小只能为{1}"),
    ("min-uint", "{0}最小只能为{1}"),
    ("min-float", "{0}最小只能为{1}"),
    ("min-list", "{0}至少包含{1}项"),
    ("min-map", "{0}至少包含{1}项"),
    // max
    ("max-string", "{0}长度不超过{1}个字符"),
    ("max-int", "{0}必须小于或等于{1}"),
    ("max-uint", "{0}必须小于或等于{1}"),
    ("max-float", "{0}必须小于或等于{1}"),
    ("max-list", "{0}最多包含{1}项"),
    ("max-map", "{0}最多包含{1}项"),
    // lt
    ("lt-string", "{0}长度必须小于{1}个字符"),
    ("lt-int", "{0}必须小于{1}"),
    ("lt-uint", "{0}必须小于{1}"),
    ("lt-float", "{0}必须小于{1}"),
    ("lt-list", "{0}必须少于{1}项"),
    ("lt-map", "{0}必须少于{1}项"),
    ("lt-timestamp", "{0}必须早于当前时间"),
    // lte
    ("lte-string", "{0}长度不能超过{1}个字符"),
    ("lte-int", "{0}必须小于或等于{1}"),
    ("lte-uint", "{0}必须小于或等于{1}"),
    ("lte-float", "{0}必须小于或等于{1}"),
    ("lte-list", "{0}只能包含{1}项"),
    ("lte-map", "{0}只能包含{1}项"),
    ("lte-timestamp", "{0}不能晚于当前时间"),
    // gt
    ("gt-string", "{0}长度必须大于{1}个字符"),
    ("gt-int", "{0}必须大于{1}"),
    ("gt-uint", "{0}必须大于{1}"),
    ("gt-float", "{0}必须大于{1}"),
    ("gt-list", "{0}必须大于{1}项"),
    ("gt-map", "{0}必须大于{1}项"),
    ("gt-timestamp", "{0}必须晚于当前时间"),
    // gte
    ("gte-string", "{0}长度必须至少为{1}个字符"),
    ("gte-int", "{0}必须大于或等于{1}"),
    ("gte-uint", "{0}必须大于或等于{1}"),
    ("gte-float", "{0}必须大于或等于{1}"),
    ("gte-list", "{0}必须至少包含{1}项"),
    ("gte-map", "{0}必须至少包含{1}项"),
    ("gte-timestamp", "{0}不能早于当前时间"),
];

/// Message templates keyed by rule name or `"{rule}-{kind}"`.
///
/// The default table carries zh-CN messages for every built-in rule; a
/// validator can swap the table wholesale via
/// [`ValidatorOption::Translations`](crate::ValidatorOption::Translations).
#[derive(Debug, Clone)]
pub struct TranslationTable {
    templates: HashMap<String, String>,
}

impl TranslationTable {
    /// An empty table. Every lookup fails until templates are inserted.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Insert or replace a template under `key` (a rule name or a
    /// `"{rule}-{kind}"` composite).
    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.templates.insert(key.into(), template.into());
    }

    /// Look up a template by exact key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    /// Bare rule name first, then the kind-composite key.
    fn lookup(&self, rule: &str, kind: Kind) -> Option<&str> {
        self.get(rule)
            .or_else(|| self.get(&format!("{rule}-{}", kind.as_str())))
    }
}

impl Default for TranslationTable {
    fn default() -> Self {
        Self {
            templates: DEFAULT_TEMPLATES
                .iter()
                .map(|&(key, template)| (key.to_string(), template.to_string()))
                .collect(),
        }
    }
}

/// Render a violation's message. Missing templates and templates without
/// placeholders are engine errors, not validation failures.
pub(crate) fn render(violation: &Violation, table: &TranslationTable) -> Result<String, RuleError> {
    let kind = violation.static_kind();
    let Some(template) = table.lookup(violation.rule(), kind) else {
        return Err(RuleError::no_template(violation.rule(), kind.as_str()));
    };
    if !template.contains("{0}") && !template.contains("{1}") {
        return Err(RuleError::bad_template(violation.rule()));
    }
    let rendered = template.replacen("{0}", violation.display_name(), 1);
    Ok(rendered.replacen("{1}", violation.param(), 1))
}
