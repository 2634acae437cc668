use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ast::{NodeId, Script};
use crate::environment::Environment;
use crate::value::Value;

/// A named value extracted from the user's message for the current turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub name: String,
    pub value: Value,
}

impl Slot {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Where the previous turn suspended. Serialized as the node identifier, with
/// `-1` standing for a fresh start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Checkpoint {
    #[default]
    Fresh,
    At(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckpointPosition {
    /// Not yet run in this resumption.
    Ahead,
    /// Already run in the pass that produced the checkpoint.
    Passed,
    /// The exact statement execution suspended at.
    At,
}

impl Checkpoint {
    pub fn is_fresh(&self) -> bool {
        matches!(self, Self::Fresh)
    }

    pub fn position(&self, node: NodeId) -> CheckpointPosition {
        match self {
            Self::Fresh => CheckpointPosition::Ahead,
            Self::At(checkpoint) if node > *checkpoint => CheckpointPosition::Ahead,
            Self::At(checkpoint) if node == *checkpoint => CheckpointPosition::At,
            Self::At(_) => CheckpointPosition::Passed,
        }
    }
}

impl From<i64> for Checkpoint {
    fn from(raw: i64) -> Self {
        if raw < 0 {
            Self::Fresh
        } else {
            Self::At(NodeId(raw as u64))
        }
    }
}

impl From<Checkpoint> for i64 {
    fn from(checkpoint: Checkpoint) -> Self {
        match checkpoint {
            Checkpoint::Fresh => -1,
            Checkpoint::At(node) => node.0 as i64,
        }
    }
}

impl From<NodeId> for Checkpoint {
    fn from(node: NodeId) -> Self {
        Self::At(node)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Plain informational output; nothing is awaited.
    Inform,
    /// Awaiting a free-form reply.
    Command,
    /// Awaiting a yes/no reply.
    Confirm,
    /// Awaiting a pick among listed options.
    Select,
    Assign,
    Get,
}

impl ActionKind {
    pub fn from_user_action(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "command" => Some(Self::Command),
            "confirm" => Some(Self::Confirm),
            "select" => Some(Self::Select),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Inform => "inform",
            Self::Command => "command",
            Self::Confirm => "confirm",
            Self::Select => "select",
            Self::Assign => "assign",
            Self::Get => "get",
        }
    }
}

/// What a resource operation hands back when it has something to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationOutput {
    pub text: String,
    pub action: ActionKind,
}

impl OperationOutput {
    pub fn new(text: impl Into<String>, action: ActionKind) -> Self {
        Self {
            text: text.into(),
            action,
        }
    }
}

/// The current turn's raw input, as seen by a pending interaction.
#[derive(Debug, Clone, Copy)]
pub struct UserReply<'a> {
    pub message: &'a str,
    pub slots: &'a [Slot],
}

impl<'a> UserReply<'a> {
    pub fn slot(&self, name: &str) -> Option<&'a Value> {
        self.slots
            .iter()
            .find(|slot| slot.name == name)
            .map(|slot| &slot.value)
    }
}

/// Output of one evaluation pass that produced something to show.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResult {
    pub response_text: String,
    #[serde(skip)]
    pub script: Arc<Script>,
    pub checkpoint: NodeId,
    pub environment: Environment,
    pub action: ActionKind,
}

#[cfg(test)]
mod types_tests {
    use super::*;

    #[test]
    fn position_compares_node_against_checkpoint() {
        let checkpoint = Checkpoint::At(NodeId(10));
        assert_eq!(checkpoint.position(NodeId(11)), CheckpointPosition::Ahead);
        assert_eq!(checkpoint.position(NodeId(10)), CheckpointPosition::At);
        assert_eq!(checkpoint.position(NodeId(9)), CheckpointPosition::Passed);
        assert_eq!(Checkpoint::Fresh.position(NodeId(0)), CheckpointPosition::Ahead);
    }

    #[test]
    fn checkpoint_serializes_as_integer_with_fresh_sentinel() {
        assert_eq!(serde_json::to_string(&Checkpoint::Fresh).expect("json"), "-1");
        assert_eq!(
            serde_json::to_string(&Checkpoint::At(NodeId(4))).expect("json"),
            "4"
        );
        let back: Checkpoint = serde_json::from_str("12").expect("parse");
        assert_eq!(back, Checkpoint::At(NodeId(12)));
    }

    #[test]
    fn user_action_names_map_to_interaction_kinds() {
        assert_eq!(ActionKind::from_user_action("Confirm"), Some(ActionKind::Confirm));
        assert_eq!(ActionKind::from_user_action("other"), None);
        assert_eq!(ActionKind::Select.name(), "select");
    }

    #[test]
    fn reply_finds_first_matching_slot() {
        let slots = vec![Slot::new("size", "large"), Slot::new("size", "small")];
        let reply = UserReply {
            message: "hi",
            slots: &slots,
        };
        assert_eq!(reply.slot("size"), Some(&Value::from("large")));
        assert_eq!(reply.slot("crust"), None);
    }
}
