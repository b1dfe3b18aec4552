use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging;

use self::{auto_play::AutoPlayArg, play::PlayArg};

mod auto_play;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Write log records to this file (stderr for headless commands otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Play headless games with a greedy policy and print a JSON summary
    AutoPlay(#[clap(flatten)] AutoPlayArg),
}

impl Mode {
    fn owns_terminal(&self) -> bool {
        matches!(self, Mode::Play(_))
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mode = args.mode.unwrap_or(Mode::Play(PlayArg::default()));
    logging::init(args.log_file.as_deref(), mode.owns_terminal())?;
    match mode {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::AutoPlay(arg) => auto_play::run(&arg)?,
    }
    Ok(())
}
