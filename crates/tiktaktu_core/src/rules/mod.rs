//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating a board
//! according to tic-tac-toe rules. Rules are separated from board
//! storage so the reducer and the persistence layer can share them.

pub mod draw;
pub mod status;
pub mod turn;
pub mod win;

pub use draw::{is_draw, is_full};
pub use status::{Status, compute_status};
pub use turn::compute_next_player;
pub use win::{LINES, Line, Win, compute_winner};
