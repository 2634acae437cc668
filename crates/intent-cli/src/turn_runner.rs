use std::path::{Path, PathBuf};
use std::sync::Arc;

use intent_api::{Session, SessionOptions};
use intent_core::{Checkpoint, IntentError, Slot, TurnResult};
use intent_runtime::{AdapterFactory, DefaultAdapterFactory};
use tracing::info;

use crate::{
    load_cli_state, load_intent, save_cli_state, CliStateV1, TurnArgs, TurnEvent, TurnOutcome,
    CLI_STATE_SCHEMA, DEFAULT_INTENT,
};

pub(crate) fn run_turn(args: TurnArgs) -> Result<i32, IntentError> {
    let intent_name = args.intent.as_deref().unwrap_or(DEFAULT_INTENT);
    let loaded = load_intent(&args.scripts_dir, intent_name)?;
    let slots = parse_slots(&args.slots)?;
    let options = session_options(args.seed, args.file_root.as_deref());

    let mut session = match args.state_in.as_deref() {
        Some(state_in) => {
            let state = load_cli_state(Path::new(state_in))?;
            if state.script_id != loaded.id {
                return Err(IntentError::host(
                    "CLI_STATE_SCRIPT_MISMATCH",
                    format!(
                        "State belongs to {}, not {}",
                        state.script_id, loaded.id
                    ),
                ));
            }
            Session::resume(loaded.script, state.session, options)?
        }
        None => Session::new(loaded.script, options),
    };

    let result = session.turn(&args.message, &slots)?;
    let outcome = outcome_from(result.as_ref(), session.checkpoint());
    info!(
        intent = %loaded.name,
        checkpoint = i64::from(outcome.checkpoint),
        "turn finished"
    );

    let state_out = PathBuf::from(&args.state_out);
    save_cli_state(
        &state_out,
        &CliStateV1 {
            schema_version: CLI_STATE_SCHEMA.to_string(),
            script_id: loaded.id,
            session: session.snapshot(),
        },
    )?;

    for line in render_outcome(&outcome, Some(&state_out)) {
        println!("{}", line);
    }
    Ok(0)
}

pub(crate) fn session_options(seed: Option<u32>, file_root: Option<&str>) -> SessionOptions {
    let adapters = file_root.map(|root| {
        Arc::new(DefaultAdapterFactory::with_file_root(root)) as Arc<dyn AdapterFactory>
    });
    SessionOptions {
        adapters,
        random_seed: seed,
    }
}

/// Parses repeated `name=value` arguments. Values stay text.
pub(crate) fn parse_slots(raw: &[String]) -> Result<Vec<Slot>, IntentError> {
    raw.iter()
        .map(|entry| match entry.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => Ok(Slot::new(name.trim(), value)),
            _ => Err(IntentError::host(
                "CLI_SLOT_INVALID",
                format!("Slot must look like name=value: {}", entry),
            )),
        })
        .collect()
}

pub(crate) fn outcome_from(result: Option<&TurnResult>, checkpoint: Checkpoint) -> TurnOutcome {
    match result {
        Some(result) => TurnOutcome {
            event: TurnEvent::Reply,
            text: Some(result.response_text.clone()),
            action: Some(result.action),
            checkpoint,
        },
        None => TurnOutcome {
            event: TurnEvent::End,
            text: None,
            action: None,
            checkpoint,
        },
    }
}

pub(crate) fn render_outcome(outcome: &TurnOutcome, state_out: Option<&Path>) -> Vec<String> {
    let mut lines = vec!["RESULT:OK".to_string()];
    match outcome.event {
        TurnEvent::Reply => lines.push("EVENT:REPLY".to_string()),
        TurnEvent::End => lines.push("EVENT:END".to_string()),
    }
    if let Some(text) = &outcome.text {
        let encoded = serde_json::to_string(text).unwrap_or_else(|_| "null".to_string());
        lines.push(format!("TEXT_JSON:{}", encoded));
    }
    if let Some(action) = outcome.action {
        lines.push(format!("ACTION:{}", action.name()));
    }
    lines.push(format!("CHECKPOINT:{}", i64::from(outcome.checkpoint)));
    if let Some(path) = state_out {
        lines.push(format!("STATE_OUT:{}", path.display()));
    }
    lines
}
