//! Keyboard mapping.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use tiktaktu_core::{Intent, Position};

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the cursor to this position.
    MoveCursor(Position),
    /// Forward an intent to the controller.
    Dispatch(Intent),
    /// Leave the game.
    Quit,
}

/// Moves cursor based on arrow keys, stopping at the board edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());

    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => (row, col),
    };

    Position::from_row_col(row, col).unwrap_or(cursor)
}

/// Maps a key event to a command. Release events and unbound keys map to `None`.
pub fn command_for(key: KeyEvent, cursor: Position) -> Option<Command> {
    // crossterm reports both press and release on some platforms.
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('r') => Some(Command::Dispatch(Intent::Restart)),
        KeyCode::Enter | KeyCode::Char(' ') => {
            Some(Command::Dispatch(Intent::Select(cursor.to_index())))
        }
        KeyCode::Char(c @ '1'..='9') => c
            .to_digit(10)
            .map(|d| Command::Dispatch(Intent::Select(d as usize - 1))),
        code @ (KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right) => {
            Some(Command::MoveCursor(move_cursor(cursor, code)))
        }
        _ => None,
    }
}
