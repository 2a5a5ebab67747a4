//! First-class intents and transitions.
//!
//! Intents are what the view asks for; transitions are what the reducer
//! decided. Both are plain values so they can be logged and tested.

use super::GameState;
use serde::{Deserialize, Serialize};

/// A command issued by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Intent {
    /// Place the next player's mark at this board index (0-8).
    #[display("select {_0}")]
    Select(usize),
    /// Start a fresh game.
    #[display("restart")]
    Restart,
}

/// Result of reducing an intent against a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The selection was not allowed (occupied square or finished game).
    /// The state is unchanged.
    Ignored,
    /// A mark was placed.
    Moved(GameState),
    /// The game was reset. Persisted data should be cleared.
    Restarted(GameState),
}

impl Transition {
    /// The new state, if the transition produced one.
    pub fn state(&self) -> Option<&GameState> {
        match self {
            Transition::Ignored => None,
            Transition::Moved(state) | Transition::Restarted(state) => Some(state),
        }
    }
}

/// Error raised by the reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// Board index outside 0-8.
    #[display("Invalid square index {_0} (must be 0-8)")]
    InvalidIndex(usize),
}

impl std::error::Error for EngineError {}
