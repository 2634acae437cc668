use std::ffi::OsString;

use clap::Parser;
use intent_core::IntentError;

mod chat;
mod cli_args;
mod error_map;
mod models;
mod source_loader;
mod state_store;
mod turn_runner;

pub(crate) use cli_args::{ChatArgs, Cli, Mode, TurnArgs};
pub(crate) use error_map::{emit_error, host_error};
pub(crate) use models::{
    ChatCommandAction, CliStateV1, LoadedIntent, TurnEvent, TurnOutcome, CLI_STATE_SCHEMA,
    DEFAULT_INTENT, INTENT_FILE_SUFFIX,
};
pub(crate) use source_loader::load_intent;
#[cfg(test)]
pub(crate) use source_loader::{find_intent_files, make_script_id, resolve_scripts_dir};
pub(crate) use state_store::{load_cli_state, save_cli_state};
pub(crate) use turn_runner::{parse_slots, session_options};
#[cfg(test)]
pub(crate) use turn_runner::{outcome_from, render_outcome};

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<i32, IntentError> {
    match cli.command {
        Mode::Turn(args) => turn_runner::run_turn(args),
        Mode::Chat(args) => chat::run_chat(args),
    }
}
