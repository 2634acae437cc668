use std::path::PathBuf;

use intent_api::SessionState;
use intent_core::{ActionKind, Checkpoint, Script};
use serde::{Deserialize, Serialize};

pub(crate) const CLI_STATE_SCHEMA: &str = "intent-cli-state.v1";
pub(crate) const DEFAULT_INTENT: &str = "main";
pub(crate) const INTENT_FILE_SUFFIX: &str = ".intent.json";

#[derive(Debug, Clone)]
pub(crate) struct LoadedIntent {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) path: PathBuf,
    pub(crate) script: Script,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CliStateV1 {
    pub(crate) schema_version: String,
    pub(crate) script_id: String,
    pub(crate) session: SessionState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TurnEvent {
    Reply,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TurnOutcome {
    pub(crate) event: TurnEvent,
    pub(crate) text: Option<String>,
    pub(crate) action: Option<ActionKind>,
    pub(crate) checkpoint: Checkpoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChatCommandAction {
    NotHandled,
    Continue,
    Quit,
}
