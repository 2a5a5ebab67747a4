//! Complete game state.

use super::rules::{
    LINES, Line, Status, Win, compute_next_player, compute_status, compute_winner,
};
use super::{Board, Mark, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// This mark completed a line.
    Won(Mark),
    /// Board full, no line.
    Draw,
}

/// Coarse game phase.
///
/// `Terminal` is absorbing: only a restart leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Moves are accepted.
    InProgress,
    /// No further moves are accepted.
    Terminal(Outcome),
}

/// Why a set of parts does not form a valid game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum StateError {
    /// Mark counts that alternating play from X cannot produce.
    #[display("{x} X marks against {o} O marks")]
    UnbalancedMarks {
        /// Number of X marks.
        x: usize,
        /// Number of O marks.
        o: usize,
    },
    /// The winner was not the last player to move.
    #[display("{winner} won but {last_mover} moved last")]
    WinnerDidNotMoveLast {
        /// Mark holding the winning line.
        winner: Mark,
        /// Mark implied to have moved last by the counts.
        last_mover: Mark,
    },
    /// Both marks completed a line.
    #[display("Both {winner} and {loser} completed a line")]
    TwoWinners {
        /// Mark whose line takes priority.
        winner: Mark,
        /// The other mark.
        loser: Mark,
    },
    /// Next player disagrees with the board.
    #[display("Next player {given} does not match board (expected {expected})")]
    NextPlayerMismatch {
        /// Value supplied.
        given: Mark,
        /// Value implied by the board.
        expected: Mark,
    },
    /// Winner or winning line disagrees with the board.
    #[display("Winner does not match board")]
    WinMismatch,
}

impl std::error::Error for StateError {}

/// Immutable snapshot of a game.
///
/// Every field is derived from the board, so a state can never disagree
/// with itself: the winner and its line travel together in one [`Win`],
/// and the status is computed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    next_player: Mark,
    win: Option<Win>,
}

impl GameState {
    /// The canonical empty game: X to move, no winner.
    #[instrument]
    pub fn new() -> Self {
        Self::from_board(Board::new())
    }

    /// Builds the state implied by `board`.
    #[instrument]
    pub fn from_board(board: Board) -> Self {
        Self {
            board,
            next_player: compute_next_player(&board),
            win: compute_winner(&board),
        }
    }

    /// Rebuilds a state from separately stored parts.
    ///
    /// The board is the source of truth: it must be reachable by alternating
    /// play from X, and `next_player` and `win` must equal what it implies.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    #[instrument]
    pub fn from_parts(
        board: Board,
        next_player: Mark,
        win: Option<Win>,
    ) -> Result<Self, StateError> {
        check_reachable(&board)?;

        let derived = Self::from_board(board);
        if next_player != derived.next_player {
            return Err(StateError::NextPlayerMismatch {
                given: next_player,
                expected: derived.next_player,
            });
        }
        if win != derived.win {
            return Err(StateError::WinMismatch);
        }
        Ok(derived)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns whose turn it is.
    pub fn next_player(&self) -> Mark {
        self.next_player
    }

    /// Returns the win record, if the game has been won.
    pub fn win(&self) -> Option<&Win> {
        self.win.as_ref()
    }

    /// Returns the winning mark.
    pub fn winner(&self) -> Option<Mark> {
        self.win.map(|w| w.mark())
    }

    /// Returns the winning line.
    pub fn winner_line(&self) -> Option<Line> {
        self.win.map(|w| w.line())
    }

    /// Returns the derived status.
    pub fn status(&self) -> Status {
        compute_status(self.win.as_ref(), &self.board, self.next_player)
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        match self.status() {
            Status::NextPlayer(_) => Phase::InProgress,
            Status::Winner(mark) => Phase::Terminal(Outcome::Won(mark)),
            Status::Draw => Phase::Terminal(Outcome::Draw),
        }
    }

    /// Returns true if a selection at `pos` would be accepted.
    pub fn accepts(&self, pos: Position) -> bool {
        self.win.is_none() && self.board.is_empty(pos)
    }

    /// Returns true if `pos` is part of the winning line.
    pub fn is_winning_cell(&self, pos: Position) -> bool {
        self.win.is_some_and(|w| w.line().contains(pos))
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Rejects boards that alternating play from X cannot produce.
fn check_reachable(board: &Board) -> Result<(), StateError> {
    let x = board.count_of(Mark::X);
    let o = board.count_of(Mark::O);

    if x != o && x != o + 1 {
        return Err(StateError::UnbalancedMarks { x, o });
    }

    let Some(win) = compute_winner(board) else {
        return Ok(());
    };

    let last_mover = if x == o { Mark::O } else { Mark::X };
    if win.mark() != last_mover {
        return Err(StateError::WinnerDidNotMoveLast {
            winner: win.mark(),
            last_mover,
        });
    }

    // Play stops at the first completed line, so the loser cannot have one.
    let loser = win.mark().opponent();
    let loser_has_line = LINES.iter().any(|line| {
        line.positions()
            .iter()
            .all(|&pos| board.get(pos).mark() == Some(loser))
    });
    if loser_has_line {
        return Err(StateError::TwoWinners {
            winner: win.mark(),
            loser,
        });
    }

    Ok(())
}
