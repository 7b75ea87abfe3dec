use std::fmt;

use crate::violation::Violation;

/// Top-level error type returned by validation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The first validation rule violated during traversal.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The rule tags or the engine configuration are broken.
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// The payload handed to `bind_and_validate` could not be decoded.
    #[error("failed to decode payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Returned when a field value violates one of its rules.
///
/// Traversal is fail-fast, so exactly one [`Violation`] is carried: the
/// first one encountered in declaration order.
#[derive(Debug)]
pub struct ValidationError {
    violation: Violation,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error: {}", self.violation)
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub(crate) fn new(violation: Violation) -> Self {
        Self { violation }
    }

    /// The context of the violated field.
    #[must_use]
    pub fn violation(&self) -> &Violation {
        &self.violation
    }

    pub(crate) fn violation_mut(&mut self) -> &mut Violation {
        &mut self.violation
    }
}

/// Returned when the validation rules themselves are broken: a malformed
/// tag, an unknown rule name, a rule applied to a kind it does not
/// support, a malformed parameter, or a defective message template.
///
/// This class is disjoint from [`ValidationError`]; it signals a
/// programming error in the caller's tags or the engine's tables, never
/// invalid input data.
#[derive(Debug, thiserror::Error)]
#[error("rule error: {cause}")]
pub struct RuleError {
    /// Description of what is broken.
    pub cause: String,
}

impl RuleError {
    pub(crate) fn invalid_tag(field: &str) -> Self {
        Self {
            cause: format!("invalid validation tag on field {field}"),
        }
    }

    pub(crate) fn unknown_rule(rule: &str) -> Self {
        Self {
            cause: format!("undefined validation rule `{rule}`"),
        }
    }

    pub(crate) fn unsupported_kind(rule: &str, kind: &str) -> Self {
        Self {
            cause: format!("rule `{rule}` does not apply to {kind} values"),
        }
    }

    pub(crate) fn bad_param(rule: &str, param: &str) -> Self {
        Self {
            cause: format!("rule `{rule}` has malformed parameter `{param}`"),
        }
    }

    pub(crate) fn no_template(rule: &str, kind: &str) -> Self {
        Self {
            cause: format!("no message template for rule `{rule}` on {kind} values"),
        }
    }

    pub(crate) fn bad_template(key: &str) -> Self {
        Self {
            cause: format!("message template `{key}` contains no placeholders"),
        }
    }

    /// Attach the field name to an error raised below the walker.
    pub(crate) fn on_field(self, field: &str) -> Self {
        Self {
            cause: format!("{} (field {field})", self.cause),
        }
    }
}
