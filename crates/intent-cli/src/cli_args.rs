use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "intent-cli")]
#[command(about = "Runs intent scripts turn by turn")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    /// Run a single turn and persist the session state.
    Turn(TurnArgs),
    /// Interactive line-mode conversation.
    Chat(ChatArgs),
}

#[derive(Debug, Args)]
pub(crate) struct TurnArgs {
    #[arg(long = "scripts-dir")]
    pub(crate) scripts_dir: String,
    #[arg(long = "intent")]
    pub(crate) intent: Option<String>,
    #[arg(long = "state-in")]
    pub(crate) state_in: Option<String>,
    #[arg(long = "state-out")]
    pub(crate) state_out: String,
    #[arg(long = "message")]
    pub(crate) message: String,
    /// Extracted slot as `name=value`; repeatable.
    #[arg(long = "slot")]
    pub(crate) slots: Vec<String>,
    #[arg(long = "seed")]
    pub(crate) seed: Option<u32>,
    #[arg(long = "file-root")]
    pub(crate) file_root: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct ChatArgs {
    #[arg(long = "scripts-dir")]
    pub(crate) scripts_dir: String,
    #[arg(long = "intent")]
    pub(crate) intent: Option<String>,
    #[arg(long = "seed")]
    pub(crate) seed: Option<u32>,
    #[arg(long = "file-root")]
    pub(crate) file_root: Option<String>,
}
