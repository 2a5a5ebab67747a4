//! Pure tic-tac-toe rules.
//!
//! # Architecture
//!
//! - **Types**: [`Mark`], [`Square`], [`Board`], [`Position`]
//! - **Rules**: pure functions over a board ([`compute_winner`],
//!   [`compute_next_player`], [`compute_status`])
//! - **State**: [`GameState`], an immutable value derived from its board
//! - **Reducer**: [`reduce`] turns an [`Intent`] into a [`Transition`]
//!
//! Nothing in this crate performs I/O.
//!
//! # Example
//!
//! ```
//! use tiktaktu_core::{GameState, Intent, Transition, reduce};
//!
//! let state = GameState::new();
//! let Transition::Moved(state) = reduce(&state, Intent::Select(4)).unwrap() else {
//!     panic!("first move is always accepted");
//! };
//! assert_eq!(state.status().to_string(), "Next player: ⭕");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod position;
mod reducer;
pub mod rules;
mod state;
mod types;

pub use action::{EngineError, Intent, Transition};
pub use position::Position;
pub use reducer::{apply_restart, apply_select, reduce};
pub use rules::{
    LINES, Line, Status, Win, compute_next_player, compute_status, compute_winner, is_draw,
    is_full,
};
pub use state::{GameState, Outcome, Phase, StateError};
pub use types::{Board, Mark, Square};
