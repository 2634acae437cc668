use std::sync::OnceLock;

use intent_core::{
    ActionKind, IntentError, OperationOutput, PropertySet, ResourceKind, UserReply, Value,
};
use regex::Regex;
use tracing::warn;

use super::{text_property, ResourceAdapter};

const SEND: &str = "send";

/// Outbound messages to the user. A responder may declare an interaction
/// (`user_action`) that turns its `send` into a pending request.
#[derive(Debug, Clone, PartialEq)]
pub struct Responder {
    text: String,
    interaction: Option<ActionKind>,
    options: Vec<String>,
    slot: Option<String>,
}

impl Responder {
    pub fn from_properties(properties: &PropertySet) -> Self {
        let mut responder = Self {
            text: String::new(),
            interaction: None,
            options: Vec::new(),
            slot: None,
        };
        responder.update_properties(properties);
        responder
    }

    fn render(&self) -> String {
        if self.interaction != Some(ActionKind::Select) || self.options.is_empty() {
            return self.text.clone();
        }
        let mut rendered = self.text.clone();
        for (index, option) in self.options.iter().enumerate() {
            rendered.push('\n');
            rendered.push_str(&format!("{}. {}", index + 1, option));
        }
        rendered
    }

    pub fn select_option(&self, answer: &str) -> Option<&str> {
        let answer = answer.trim();
        if let Ok(number) = answer.parse::<usize>() {
            return number
                .checked_sub(1)
                .and_then(|index| self.options.get(index))
                .map(String::as_str);
        }

        let lowered = answer.to_lowercase();
        self.options
            .iter()
            .find(|option| option.to_lowercase() == lowered)
            .or_else(|| {
                self.options
                    .iter()
                    .find(|option| lowered.contains(&option.to_lowercase()))
            })
            .map(String::as_str)
    }
}

pub fn parse_confirmation(answer: &str) -> Option<bool> {
    static YES: OnceLock<Regex> = OnceLock::new();
    static NO: OnceLock<Regex> = OnceLock::new();
    let yes = YES.get_or_init(|| {
        Regex::new(r"(?i)^\s*(y|yes|yeah|yep|yup|sure|ok|okay|correct|confirm|affirmative)\b")
            .expect("confirmation regex must compile")
    });
    let no = NO.get_or_init(|| {
        Regex::new(r"(?i)^\s*(n|no|nope|nah|cancel|wrong|negative)\b")
            .expect("rejection regex must compile")
    });

    if yes.is_match(answer) {
        Some(true)
    } else if no.is_match(answer) {
        Some(false)
    } else {
        None
    }
}

impl ResourceAdapter for Responder {
    fn update_properties(&mut self, properties: &PropertySet) {
        self.text = text_property(properties, "text").unwrap_or_default();
        self.interaction = text_property(properties, "user_action")
            .and_then(|raw| ActionKind::from_user_action(&raw));
        self.options = match properties.get("options") {
            Some(Value::Array(values)) => values.iter().map(ToString::to_string).collect(),
            _ => Vec::new(),
        };
        self.slot = text_property(properties, "slot");
    }

    fn execute_operation(
        &mut self,
        operation: &str,
    ) -> Result<Option<OperationOutput>, IntentError> {
        if operation != SEND {
            return Err(IntentError::adapter_failure(
                ResourceKind::Responder.name(),
                operation,
                "unsupported operation",
            ));
        }
        let action = self.interaction.unwrap_or(ActionKind::Inform);
        Ok(Some(OperationOutput::new(self.render(), action)))
    }

    fn resolve_answer(&self, reply: &UserReply<'_>) -> Option<Value> {
        let filled = self
            .slot
            .as_deref()
            .and_then(|name| reply.slot(name))
            .filter(|value| !value.is_null());
        let answer = filled
            .map(ToString::to_string)
            .unwrap_or_else(|| reply.message.to_string());

        match self.interaction {
            None => None,
            Some(ActionKind::Command) => {
                Some(filled.cloned().unwrap_or(Value::String(answer)))
            }
            Some(ActionKind::Confirm) => {
                let parsed = parse_confirmation(&answer);
                if parsed.is_none() {
                    warn!(answer = %answer, "confirmation answer not recognised");
                }
                Some(parsed.map(Value::Bool).unwrap_or(Value::Null))
            }
            Some(ActionKind::Select) => {
                let picked = self.select_option(&answer);
                if picked.is_none() {
                    warn!(answer = %answer, "selection answer matches no option");
                }
                Some(picked.map(Value::from).unwrap_or(Value::Null))
            }
            Some(_) => None,
        }
    }
}

#[cfg(test)]
mod responder_tests {
    use super::*;
    use intent_core::Slot;

    fn responder(entries: &[(&str, Value)]) -> Responder {
        let properties = entries
            .iter()
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .collect::<PropertySet>();
        Responder::from_properties(&properties)
    }

    fn pizza_menu() -> Responder {
        responder(&[
            ("text", Value::from("Which size?")),
            ("user_action", Value::from("select")),
            (
                "options",
                Value::Array(vec![
                    Value::from("Small"),
                    Value::from("Medium"),
                    Value::from("Large"),
                ]),
            ),
        ])
    }

    #[test]
    fn send_renders_numbered_options_for_select() {
        let mut menu = pizza_menu();
        let output = menu
            .execute_operation("send")
            .expect("send should pass")
            .expect("send should emit");
        assert_eq!(output.text, "Which size?\n1. Small\n2. Medium\n3. Large");
        assert_eq!(output.action, ActionKind::Select);
    }

    #[test]
    fn unknown_operation_is_an_adapter_failure() {
        let mut plain = responder(&[("text", Value::from("hi"))]);
        let error = plain
            .execute_operation("shout")
            .expect_err("unknown operation should fail");
        assert_eq!(error.code, "ADAPTER_OPERATION_FAILED");
    }

    #[test]
    fn select_accepts_number_exact_and_contained_text() {
        let menu = pizza_menu();
        assert_eq!(menu.select_option("2"), Some("Medium"));
        assert_eq!(menu.select_option("large"), Some("Large"));
        assert_eq!(menu.select_option("a small one please"), Some("Small"));
        assert_eq!(menu.select_option("4"), None);
        assert_eq!(menu.select_option("giant"), None);
    }

    #[test]
    fn confirmation_vocabulary() {
        assert_eq!(parse_confirmation("Yes please"), Some(true));
        assert_eq!(parse_confirmation("ok"), Some(true));
        assert_eq!(parse_confirmation("nope"), Some(false));
        assert_eq!(parse_confirmation("maybe"), None);
    }

    #[test]
    fn answers_follow_declared_interaction() {
        let confirm = responder(&[("user_action", Value::from("confirm"))]);
        let reply = UserReply {
            message: "yes",
            slots: &[],
        };
        assert_eq!(confirm.resolve_answer(&reply), Some(Value::Bool(true)));

        let command = responder(&[("user_action", Value::from("command"))]);
        assert_eq!(command.resolve_answer(&reply), Some(Value::from("yes")));

        let inform = responder(&[("text", Value::from("fyi"))]);
        assert_eq!(inform.resolve_answer(&reply), None);
    }

    #[test]
    fn filled_slot_takes_precedence_over_message() {
        let menu = responder(&[
            ("user_action", Value::from("select")),
            (
                "options",
                Value::Array(vec![Value::from("Small"), Value::from("Large")]),
            ),
            ("slot", Value::from("size")),
        ]);
        let slots = vec![Slot::new("size", "large")];
        let reply = UserReply {
            message: "whatever",
            slots: &slots,
        };
        assert_eq!(menu.resolve_answer(&reply), Some(Value::from("Large")));
    }
}
