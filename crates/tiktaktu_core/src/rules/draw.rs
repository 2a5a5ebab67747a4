//! Draw detection logic for tic-tac-toe.

use super::super::Board;
use super::win::compute_winner;
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
#[instrument]
pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

/// A full board with no completed line.
#[instrument]
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && compute_winner(board).is_none()
}
