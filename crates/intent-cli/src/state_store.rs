use std::fs;
use std::path::Path;

use intent_core::IntentError;

use crate::{host_error, CliStateV1, CLI_STATE_SCHEMA};

pub(crate) fn save_cli_state(path: &Path, state: &CliStateV1) -> Result<(), IntentError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(host_error("CLI_STATE_WRITE"))?;
        }
    }
    let encoded =
        serde_json::to_string_pretty(state).map_err(host_error("CLI_STATE_ENCODE"))?;
    fs::write(path, encoded).map_err(host_error("CLI_STATE_WRITE"))
}

pub(crate) fn load_cli_state(path: &Path) -> Result<CliStateV1, IntentError> {
    if !path.exists() {
        return Err(IntentError::host(
            "CLI_STATE_NOT_FOUND",
            format!("State file does not exist: {}", path.display()),
        ));
    }

    let raw = fs::read_to_string(path).map_err(host_error("CLI_STATE_READ"))?;
    let state: CliStateV1 =
        serde_json::from_str(&raw).map_err(host_error("CLI_STATE_INVALID"))?;
    if state.schema_version != CLI_STATE_SCHEMA {
        return Err(IntentError::host(
            "CLI_STATE_SCHEMA",
            format!("Unsupported CLI state schema: {}", state.schema_version),
        ));
    }
    Ok(state)
}
