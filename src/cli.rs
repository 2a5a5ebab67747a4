//! Command-line interface for tiktaktu.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tiktaktu - tic-tac-toe in the terminal, resumed where you left off
#[derive(Parser, Debug)]
#[command(name = "tiktaktu")]
#[command(about = "Terminal tic-tac-toe with a saved game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (optional)
    #[arg(short, long, default_value = "tiktaktu.toml")]
    pub config: PathBuf,

    /// Override the saved-game database path
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal UI
    Play,

    /// Print the saved board and status, then exit
    Show,

    /// Delete the saved game
    Reset,
}
