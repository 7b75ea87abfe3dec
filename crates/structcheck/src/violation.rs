use std::fmt;

use structcheck_reflect::{FieldDescriptor, Kind};

/// The context of the first rule violation found during traversal: which
/// field failed, which rule invocation failed it, and the rendered
/// message.
#[derive(Debug, Clone)]
pub struct Violation {
    field: &'static FieldDescriptor,
    index: usize,
    display_name: String,
    rule: String,
    param: String,
    message: String,
}

impl Violation {
    pub(crate) fn new(
        field: &'static FieldDescriptor,
        index: usize,
        display_name: String,
        rule: String,
        param: String,
    ) -> Self {
        Self {
            field,
            index,
            display_name,
            rule,
            param,
            message: String::new(),
        }
    }

    /// The descriptor of the violated field.
    #[must_use]
    pub fn field_descriptor(&self) -> &'static FieldDescriptor {
        self.field
    }

    /// The violated field's index within its record, in declaration order.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The human-facing field label: the description tag when present,
    /// otherwise the field's own name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The name of the rule that failed, as written in the tag.
    #[must_use]
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// The failed rule's parameter string (may be empty).
    #[must_use]
    pub fn param(&self) -> &str {
        &self.param
    }

    /// The field's static declared kind.
    #[must_use]
    pub fn static_kind(&self) -> Kind {
        self.field.kind
    }

    /// The translated message, empty until rendered.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn set_message(&mut self, message: String) {
        self.message = message;
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.message.is_empty() {
            f.write_str(&self.message)
        } else if !self.rule.is_empty() {
            write!(f, "{}: [{}]", self.display_name, self.rule)
        } else {
            f.write_str("[unknown]")
        }
    }
}
