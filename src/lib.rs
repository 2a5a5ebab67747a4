//! tiktaktu - terminal tic-tac-toe with a saved game.
//!
//! The rules live in [`tiktaktu_core`]. This crate adds everything around
//! them.
//!
//! # Architecture
//!
//! - **Controller**: owns the single [`GameState`](tiktaktu_core::GameState)
//!   and notifies subscribers after each accepted intent
//! - **Persistence**: a subscriber that writes the game to a key-value store
//!   and restores it at startup
//! - **Store**: the [`KeyValueStore`] seam, backed by SQLite via diesel
//! - **TUI**: ratatui view that renders state and sends intents
//!
//! # Example
//!
//! ```
//! use tiktaktu::{GameController, MemoryStore, PersistenceAdapter};
//!
//! let store = MemoryStore::new();
//! let mut controller = GameController::bootstrap(PersistenceAdapter::new(store.clone()));
//! controller.select(4).unwrap();
//!
//! // The move was saved; a fresh controller picks it up.
//! let resumed = GameController::bootstrap(PersistenceAdapter::new(store));
//! assert_eq!(resumed.state(), controller.state());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod controller;
mod db;
mod persistence;
mod snapshot;
mod store;
mod tui;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError};

// Crate-level exports - Controller
pub use controller::{GameController, StateSubscriber};

// Crate-level exports - Database
pub use db::{KvEntry, KvRepository, MIGRATIONS, NewKvEntry, StoreError, StoreOp};

// Crate-level exports - Persistence
pub use persistence::PersistenceAdapter;
pub use snapshot::{
    NEXT_PLAYER_KEY, SNAPSHOT_KEYS, SQUARES_KEY, STATUS_KEY, Snapshot, SnapshotError,
    WINNER_KEY, WINNER_LINE_KEY,
};
pub use store::{KeyValueStore, MemoryStore};

// Crate-level exports - Terminal UI
pub use tui::{App, run_tui};

// Crate-level exports - Game types
pub use tiktaktu_core::{Board, EngineError, GameState, Intent, Mark, Position, Status, Transition};
