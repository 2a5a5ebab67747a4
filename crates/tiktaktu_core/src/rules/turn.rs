//! Turn order.

use super::super::{Board, Mark};
use tracing::instrument;

/// Returns whose turn it is on `board`.
///
/// X always moves first, so X is next whenever an even number of squares
/// is filled.
#[instrument]
pub fn compute_next_player(board: &Board) -> Mark {
    if board.filled_count() % 2 == 0 {
        Mark::X
    } else {
        Mark::O
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::{Position, Square};
    use super::*;

    /// Decodes `n` as a base-3 board: 0 empty, 1 X, 2 O.
    fn board_from_code(mut n: u32) -> Board {
        let mut squares = [Square::Empty; 9];
        for square in squares.iter_mut() {
            *square = match n % 3 {
                0 => Square::Empty,
                1 => Square::Occupied(Mark::X),
                _ => Square::Occupied(Mark::O),
            };
            n /= 3;
        }
        Board::from_squares(squares)
    }

    #[test]
    fn test_empty_board_is_x() {
        assert_eq!(compute_next_player(&Board::new()), Mark::X);
    }

    #[test]
    fn test_one_mark_is_o() {
        let board = Board::new().with_mark(Position::Center, Mark::X);
        assert_eq!(compute_next_player(&board), Mark::O);
    }

    #[test]
    fn test_parity_over_every_board() {
        for code in 0..3u32.pow(9) {
            let board = board_from_code(code);
            let expected = if board.filled_count() % 2 == 0 {
                Mark::X
            } else {
                Mark::O
            };
            assert_eq!(compute_next_player(&board), expected, "board code {code}");
        }
    }
}
