//! Depth-first traversal of a record's field graph.
//!
//! The walk visits fields in declaration order, evaluates each field's
//! rule tag, then descends into record values, record elements of
//! sequences, and record values of maps. The first violated rule or
//! engine error unwinds through every recursion frame via `?`.

use structcheck_reflect::{FieldDescriptor, FieldValue, Reflect};

use crate::config::{ValidationConfig, SKIP_TAG};
use crate::error::{Error, RuleError, ValidationError};
use crate::violation::Violation;

use super::rules::{self, one_of::OneofCache};
use super::tags::{self, RuleGroup};

/// Shared state for one validation pass.
pub(crate) struct Walk<'a> {
    pub config: &'a ValidationConfig,
    pub oneof: &'a OneofCache,
}

impl Walk<'_> {
    pub(crate) fn record(&self, record: &dyn Reflect) -> Result<(), Error> {
        let descriptor = record.descriptor();
        tracing::trace!(record = descriptor.name, "walking record");

        for (index, field) in descriptor.fields.iter().enumerate() {
            let rule_tag = field.tag(&self.config.tags.rule);
            if rule_tag == Some(SKIP_TAG) {
                continue;
            }

            let value = record.get(index);
            if let Some(tag) = rule_tag.filter(|tag| !tag.is_empty()) {
                self.check_field(index, field, &value, tag)?;
            }
            self.descend(&value)?;
        }
        Ok(())
    }

    /// Recurse into nested records. Scalar sequence elements and scalar
    /// map values are not validatable on their own and are skipped.
    fn descend(&self, value: &FieldValue<'_>) -> Result<(), Error> {
        match value {
            FieldValue::Record(nested) => self.record(*nested),
            FieldValue::List(items) => {
                for item in items {
                    if let FieldValue::Record(nested) = item {
                        self.record(*nested)?;
                    }
                }
                Ok(())
            }
            FieldValue::Map(entries) => {
                for (_, entry) in entries {
                    if let FieldValue::Record(nested) = entry {
                        self.record(*nested)?;
                    }
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn check_field(
        &self,
        index: usize,
        field: &'static FieldDescriptor,
        value: &FieldValue<'_>,
        tag: &str,
    ) -> Result<(), Error> {
        let parsed = tags::parse(tag);
        for slot in &parsed.slots {
            if self.is_optional_marker(slot) {
                if !rules::has_value(value) {
                    // Absent or zero: the remaining slots do not apply.
                    return Ok(());
                }
                continue;
            }
            self.check_slot(index, field, value, slot)?;
        }
        Ok(())
    }

    fn is_optional_marker(&self, slot: &RuleGroup) -> bool {
        slot.alternatives.len() == 1
            && slot.alternatives[0].param.is_empty()
            && slot.alternatives[0].name == self.config.tags.optional_marker
    }

    fn check_slot(
        &self,
        index: usize,
        field: &'static FieldDescriptor,
        value: &FieldValue<'_>,
        slot: &RuleGroup,
    ) -> Result<(), Error> {
        for invocation in &slot.alternatives {
            if invocation.name.is_empty() {
                return Err(RuleError::invalid_tag(field.name).into());
            }
            let satisfied =
                rules::evaluate(&invocation.name, value, &invocation.param, self.config, self.oneof)
                    .map_err(|err| err.on_field(field.name))?;
            if satisfied {
                return Ok(());
            }
        }

        // All alternatives failed; the first one names the failure.
        let failed = &slot.alternatives[0];
        tracing::trace!(
            field = field.name,
            rule = %failed.name,
            or_group = failed.or_group,
            "rule slot failed"
        );
        Err(ValidationError::new(Violation::new(
            field,
            index,
            self.display_name(field),
            failed.name.clone(),
            failed.param.clone(),
        ))
        .into())
    }

    fn display_name(&self, field: &'static FieldDescriptor) -> String {
        field
            .tag(&self.config.tags.describe)
            .filter(|describe| !describe.is_empty())
            .unwrap_or(field.name)
            .to_string()
    }
}
