//! The rule-tag grammar.
//!
//! A tag is a comma-separated list of slots; each slot is a single rule
//! or a pipe-separated OR-group of alternatives; each alternative is
//! `name` or `name=parameter`, splitting on the first `=` only.
//! Parameters carry literal commas and pipes as the placeholder codes
//! `0x2C` and `0x7C`, decoded on parse and re-encoded on render.
//!
//! Parsing never fails at this layer: empty rule names survive into the
//! parsed form and are rejected by the walker.

use std::fmt;

const HEX_COMMA: &str = "0x2C";
const HEX_PIPE: &str = "0x7C";
const TAG_SEPARATOR: char = ',';
const OR_SEPARATOR: char = '|';
const KEY_SEPARATOR: char = '=';

/// One parsed rule: its name and decoded parameter, plus whether it came
/// from a pipe-joined OR-group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RuleInvocation {
    pub name: String,
    pub param: String,
    pub or_group: bool,
}

impl fmt::Display for RuleInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.param.is_empty() {
            write!(f, "{KEY_SEPARATOR}{}", encode_param(&self.param))?;
        }
        Ok(())
    }
}

/// One comma-separated slot: a single rule or an OR-group of
/// alternatives, of which any one passing satisfies the slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RuleGroup {
    pub alternatives: Vec<RuleInvocation>,
}

impl fmt::Display for RuleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, alternative) in self.alternatives.iter().enumerate() {
            if i > 0 {
                f.write_str(&OR_SEPARATOR.to_string())?;
            }
            write!(f, "{alternative}")?;
        }
        Ok(())
    }
}

/// A fully parsed rule tag: slots in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedTag {
    pub slots: Vec<RuleGroup>,
}

impl fmt::Display for ParsedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(&TAG_SEPARATOR.to_string())?;
            }
            write!(f, "{slot}")?;
        }
        Ok(())
    }
}

/// Parse a rule tag. Infallible: malformed names are caught downstream.
pub(crate) fn parse(tag: &str) -> ParsedTag {
    ParsedTag {
        slots: tag.split(TAG_SEPARATOR).map(parse_slot).collect(),
    }
}

fn parse_slot(slot: &str) -> RuleGroup {
    let alternatives: Vec<&str> = slot.split(OR_SEPARATOR).collect();
    let or_group = alternatives.len() > 1;
    RuleGroup {
        alternatives: alternatives
            .into_iter()
            .map(|alternative| parse_alternative(alternative, or_group))
            .collect(),
    }
}

fn parse_alternative(alternative: &str, or_group: bool) -> RuleInvocation {
    // Only the first `=` splits; parameters may contain more.
    let (name, param) = match alternative.split_once(KEY_SEPARATOR) {
        Some((name, param)) => (name, decode_param(param)),
        None => (alternative, String::new()),
    };
    RuleInvocation {
        name: name.to_string(),
        param,
        or_group,
    }
}

fn decode_param(param: &str) -> String {
    param.replace(HEX_COMMA, ",").replace(HEX_PIPE, "|")
}

fn encode_param(param: &str) -> String {
    param.replace(',', HEX_COMMA).replace('|', HEX_PIPE)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::collection::vec;
    use proptest::prelude::*;

    use super::{parse, RuleInvocation};

    #[test]
    fn slots_split_on_commas_in_order() {
        let parsed = parse("required,gte=0,lte=100");
        assert_eq!(parsed.slots.len(), 3);
        assert_eq!(parsed.slots[0].alternatives[0].name, "required");
        assert_eq!(parsed.slots[1].alternatives[0].param, "0");
        assert_eq!(parsed.slots[2].alternatives[0].name, "lte");
        assert_eq!(parsed.slots[2].alternatives[0].param, "100");
    }

    #[test]
    fn pipe_separated_alternatives_form_an_or_group() {
        let parsed = parse("email|eq=admin,required");
        assert_eq!(
            parsed.slots[0].alternatives,
            vec![
                RuleInvocation {
                    name: "email".into(),
                    param: String::new(),
                    or_group: true,
                },
                RuleInvocation {
                    name: "eq".into(),
                    param: "admin".into(),
                    or_group: true,
                },
            ]
        );
        assert!(!parsed.slots[1].alternatives[0].or_group);
    }

    #[test]
    fn only_the_first_equals_splits_name_from_parameter() {
        let parsed = parse("eq=a=b");
        assert_eq!(parsed.slots[0].alternatives[0].name, "eq");
        assert_eq!(parsed.slots[0].alternatives[0].param, "a=b");
    }

    #[test]
    fn escaped_commas_and_pipes_decode_into_parameters() {
        let parsed = parse("oneof=red0x2Cgreen0x7Cblue");
        assert_eq!(parsed.slots[0].alternatives[0].param, "red,green|blue");
        // ...and re-encode on render.
        assert_eq!(parsed.to_string(), "oneof=red0x2Cgreen0x7Cblue");
    }

    #[test]
    fn empty_names_survive_parsing_for_the_walker_to_reject() {
        let parsed = parse("required,");
        assert_eq!(parsed.slots.len(), 2);
        assert_eq!(parsed.slots[1].alternatives[0].name, "");

        let parsed = parse("=5");
        assert_eq!(parsed.slots[0].alternatives[0].name, "");
        assert_eq!(parsed.slots[0].alternatives[0].param, "5");
    }

    fn rule_name() -> impl Strategy<Value = String> {
        "[a-z]{1,8}"
    }

    // Parameters avoid raw separators (impossible in a well-formed tag)
    // and the letter x (so no accidental escape-code collisions).
    fn rule_param() -> impl Strategy<Value = String> {
        "[a-wyz0-9 '=.@-]{0,12}"
    }

    proptest! {
        #[test]
        fn tags_round_trip_through_parse_and_render(
            slots in vec(
                vec((rule_name(), rule_param()), 1..3),
                1..5,
            )
        ) {
            let tag = slots
                .iter()
                .map(|alternatives| {
                    alternatives
                        .iter()
                        .map(|(name, param)| {
                            if param.is_empty() {
                                name.clone()
                            } else {
                                format!("{name}={param}")
                            }
                        })
                        .collect::<Vec<_>>()
                        .join("|")
                })
                .collect::<Vec<_>>()
                .join(",");

            let parsed = parse(&tag);
            prop_assert_eq!(parsed.to_string(), tag);
        }

        #[test]
        fn escape_codes_decode_to_literals_and_back(
            before in "[a-w]{0,6}",
            after in "[a-w]{0,6}",
        ) {
            let tag = format!("oneof={before}0x2C{after}0x7C");
            let parsed = parse(&tag);
            prop_assert_eq!(
                parsed.slots[0].alternatives[0].param.clone(),
                format!("{before},{after}|")
            );
            prop_assert_eq!(parsed.to_string(), tag);
        }
    }
}
