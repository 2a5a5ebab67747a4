//! tiktaktu - terminal tic-tac-toe.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use tiktaktu::{
    AppConfig, GameController, KeyValueStore, KvRepository, MemoryStore, PersistenceAdapter,
    run_tui,
};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)?;
    if let Some(db_path) = cli.db_path {
        config = config.with_db_path(db_path);
    }

    initialize_tracing(&config)?;
    info!(db_path = %config.db_path().display(), "Starting tiktaktu");

    let adapter = PersistenceAdapter::new(open_store(&config));

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => run_tui(GameController::bootstrap(adapter)),
        Command::Show => {
            let state = adapter.load().unwrap_or_default();
            println!("{}\n\n{}", state.board().display(), state.status());
            Ok(())
        }
        Command::Reset => {
            adapter.clear();
            println!("Saved game cleared");
            Ok(())
        }
    }
}

/// Sends tracing output to the configured log file; the terminal belongs to the UI.
fn initialize_tracing(config: &AppConfig) -> Result<()> {
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file().display()))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    Ok(())
}

/// Opens the SQLite store, or an in-memory one if that fails.
#[instrument(skip(config))]
fn open_store(config: &AppConfig) -> Box<dyn KeyValueStore> {
    let db_path = config.db_path().display().to_string();
    match KvRepository::open(db_path) {
        Ok(repo) => Box::new(repo),
        Err(e) => {
            warn!(error = %e, "Saved game unavailable, playing without persistence");
            Box::new(MemoryStore::new())
        }
    }
}
