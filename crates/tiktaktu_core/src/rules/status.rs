//! Status line derivation.

use super::super::{Board, Mark};
use super::win::Win;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Human-readable game status.
///
/// Renders as `Next player: ❌`, `Winner: ⭕` or `Draw`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Status {
    /// Game continues; this mark moves next.
    #[display("Next player: {_0}")]
    NextPlayer(Mark),
    /// This mark completed a line.
    #[display("Winner: {_0}")]
    Winner(Mark),
    /// Board full with no line.
    #[display("Draw")]
    Draw,
}

impl Status {
    /// Returns true once the game can take no more moves.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::NextPlayer(_))
    }
}

/// Derives the status from the winner, the board and the next player.
#[instrument]
pub fn compute_status(win: Option<&Win>, board: &Board, next_player: Mark) -> Status {
    match win {
        Some(win) => Status::Winner(win.mark()),
        None if board.is_full() => Status::Draw,
        None => Status::NextPlayer(next_player),
    }
}
