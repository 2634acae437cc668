use std::io::{self, BufRead, Write};

use intent_api::Session;
use intent_core::{IntentError, Slot};
use tracing::warn;

use crate::{
    host_error, load_intent, parse_slots, session_options, ChatArgs, ChatCommandAction,
    DEFAULT_INTENT,
};

const HELP: &str = "commands: :help :slot name=value :state :reset :quit";

pub(crate) fn run_chat(args: ChatArgs) -> Result<i32, IntentError> {
    let intent_name = args.intent.as_deref().unwrap_or(DEFAULT_INTENT);
    let loaded = load_intent(&args.scripts_dir, intent_name)?;
    let mut session = Session::new(
        loaded.script,
        session_options(args.seed, args.file_root.as_deref()),
    );

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = io::stdout();
    run_chat_with_io(&mut session, &mut reader, &mut writer)
}

pub(crate) fn run_chat_with_io(
    session: &mut Session,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<i32, IntentError> {
    writeln!(writer, "Intent chat").map_err(host_error("CLI_IO"))?;
    writeln!(writer, "{}", HELP).map_err(host_error("CLI_IO"))?;
    let mut pending_slots: Vec<Slot> = Vec::new();

    loop {
        let Some(raw) = prompt_input_from("> ", reader, writer)? else {
            return Ok(0);
        };
        if raw.trim().is_empty() {
            continue;
        }

        let mut lines = Vec::new();
        let action = {
            let mut emit = |line: String| lines.push(line);
            handle_chat_command(raw.as_str(), session, &mut pending_slots, &mut emit)?
        };
        for line in lines {
            writeln!(writer, "{}", line).map_err(host_error("CLI_IO"))?;
        }
        match action {
            ChatCommandAction::Continue => continue,
            ChatCommandAction::Quit => return Ok(0),
            ChatCommandAction::NotHandled => {}
        }

        let slots = std::mem::take(&mut pending_slots);
        match session.turn(&raw, &slots) {
            Ok(Some(result)) => {
                writeln!(writer, "{}", result.response_text)
                    .map_err(host_error("CLI_IO"))?;
            }
            Ok(None) => writeln!(writer, "[END]").map_err(host_error("CLI_IO"))?,
            Err(error) => {
                warn!(code = %error.code, "chat turn rejected");
                writeln!(writer, "error {}: {}", error.code, error.message)
                    .map_err(host_error("CLI_IO"))?;
            }
        }
    }
}

pub(crate) fn handle_chat_command(
    raw: &str,
    session: &mut Session,
    pending_slots: &mut Vec<Slot>,
    emit: &mut dyn FnMut(String),
) -> Result<ChatCommandAction, IntentError> {
    let raw = raw.trim();
    if let Some(entry) = raw.strip_prefix(":slot ") {
        match parse_slots(&[entry.trim().to_string()]) {
            Ok(mut parsed) => {
                for slot in &parsed {
                    emit(format!("slot: {}={}", slot.name, slot.value));
                }
                pending_slots.append(&mut parsed);
            }
            Err(error) => emit(format!("error {}: {}", error.code, error.message)),
        }
        return Ok(ChatCommandAction::Continue);
    }

    match raw {
        ":help" => {
            emit(HELP.to_string());
            Ok(ChatCommandAction::Continue)
        }
        ":state" => {
            let state = serde_json::to_string(&session.snapshot())
                .map_err(host_error("CLI_STATE_ENCODE"))?;
            emit(state);
            Ok(ChatCommandAction::Continue)
        }
        ":reset" => {
            session.reset();
            pending_slots.clear();
            emit("reset".to_string());
            Ok(ChatCommandAction::Continue)
        }
        ":quit" => {
            emit("bye".to_string());
            Ok(ChatCommandAction::Quit)
        }
        _ => Ok(ChatCommandAction::NotHandled),
    }
}

/// `None` once the reader is exhausted.
pub(crate) fn prompt_input_from(
    prefix: &str,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<Option<String>, IntentError> {
    write!(writer, "{}", prefix).map_err(host_error("CLI_IO"))?;
    writer.flush().map_err(host_error("CLI_IO"))?;
    let mut input = String::new();
    let read = reader.read_line(&mut input).map_err(host_error("CLI_IO"))?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim_end_matches(&['\r', '\n'][..]).to_string()))
}
