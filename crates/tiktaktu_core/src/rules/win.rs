//! Win detection logic for tic-tac-toe.

use super::super::{Board, Mark, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Three positions that win the game when uniformly marked.
///
/// Serializes as an array of three board indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Line([Position; 3]);

impl Line {
    /// Creates a line from three positions.
    pub const fn new(positions: [Position; 3]) -> Self {
        Self(positions)
    }

    /// The positions in scan order.
    pub fn positions(&self) -> [Position; 3] {
        self.0
    }

    /// The positions as board indices.
    pub fn indices(&self) -> [usize; 3] {
        self.0.map(Position::to_index)
    }

    /// Returns true if `pos` is one of this line's cells.
    pub fn contains(&self, pos: Position) -> bool {
        self.0.contains(&pos)
    }
}

/// The eight winning lines in priority order.
///
/// Rows top to bottom, columns left to right, then the two diagonals
/// (top-left to bottom-right first). [`compute_winner`] reports the first
/// completed line in this order.
pub const LINES: [Line; 8] = [
    // Rows
    Line::new([Position::TopLeft, Position::TopCenter, Position::TopRight]),
    Line::new([Position::MiddleLeft, Position::Center, Position::MiddleRight]),
    Line::new([Position::BottomLeft, Position::BottomCenter, Position::BottomRight]),
    // Columns
    Line::new([Position::TopLeft, Position::MiddleLeft, Position::BottomLeft]),
    Line::new([Position::TopCenter, Position::Center, Position::BottomCenter]),
    Line::new([Position::TopRight, Position::MiddleRight, Position::BottomRight]),
    // Diagonals
    Line::new([Position::TopLeft, Position::Center, Position::BottomRight]),
    Line::new([Position::TopRight, Position::Center, Position::BottomLeft]),
];

/// A winning mark together with the line it completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Win {
    mark: Mark,
    line: Line,
}

impl Win {
    /// Creates a win record.
    pub fn new(mark: Mark, line: Line) -> Self {
        Self { mark, line }
    }

    /// The winning mark.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// The completed line.
    pub fn line(&self) -> Line {
        self.line
    }
}

/// Checks if there is a winner on the board.
///
/// Returns the first line, in [`LINES`] order, whose three squares hold
/// the same mark. When one move completes several lines at once the scan
/// order decides which is reported.
#[instrument]
pub fn compute_winner(board: &Board) -> Option<Win> {
    LINES.iter().find_map(|line| {
        let [a, b, c] = line.positions();
        match board.get(a) {
            Square::Occupied(mark)
                if board.get(b) == board.get(a) && board.get(c) == board.get(a) =>
            {
                Some(Win::new(mark, *line))
            }
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(mark: Mark, positions: &[Position]) -> Board {
        positions
            .iter()
            .fold(Board::new(), |board, pos| board.with_mark(*pos, mark))
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(compute_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let board = board_with(
            Mark::X,
            &[Position::TopLeft, Position::TopCenter, Position::TopRight],
        );
        let win = compute_winner(&board).unwrap();
        assert_eq!(win.mark(), Mark::X);
        assert_eq!(win.line().indices(), [0, 1, 2]);
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = board_with(
            Mark::O,
            &[Position::TopRight, Position::Center, Position::BottomLeft],
        );
        let win = compute_winner(&board).unwrap();
        assert_eq!(win.mark(), Mark::O);
        assert_eq!(win.line().indices(), [2, 4, 6]);
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = board_with(Mark::X, &[Position::TopLeft, Position::TopCenter]);
        assert_eq!(compute_winner(&board), None);
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board = board_with(Mark::X, &[Position::TopLeft, Position::TopCenter])
            .with_mark(Position::TopRight, Mark::O);
        assert_eq!(compute_winner(&board), None);
    }

    #[test]
    fn test_every_line_is_detected() {
        for line in LINES {
            let board = board_with(Mark::O, &line.positions());
            assert_eq!(compute_winner(&board), Some(Win::new(Mark::O, line)));
        }
    }

    #[test]
    fn test_row_beats_column_when_both_complete() {
        // X on the top row and the left column: both lines are complete.
        let board = board_with(
            Mark::X,
            &[
                Position::TopLeft,
                Position::TopCenter,
                Position::TopRight,
                Position::MiddleLeft,
                Position::BottomLeft,
            ],
        );
        assert_eq!(compute_winner(&board).unwrap().line(), LINES[0]);
    }

    #[test]
    fn test_column_beats_diagonal_when_both_complete() {
        let board = board_with(
            Mark::O,
            &[
                Position::TopLeft,
                Position::MiddleLeft,
                Position::BottomLeft,
                Position::Center,
                Position::BottomRight,
            ],
        );
        assert_eq!(compute_winner(&board).unwrap().line(), LINES[3]);
    }

    #[test]
    fn test_line_serializes_as_indices() {
        let json = serde_json::to_string(&LINES[7]).unwrap();
        assert_eq!(json, "[2,4,6]");
        let line: Line = serde_json::from_str("[0,4,8]").unwrap();
        assert_eq!(line, LINES[6]);
    }
}
