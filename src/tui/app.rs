//! Application state for the terminal view.

use crossterm::event::KeyEvent;
use tiktaktu_core::{GameState, Position};
use tracing::{debug, instrument, warn};

use super::input::{Command, command_for};
use crate::controller::GameController;

/// View-side state: the controller plus the cursor.
#[derive(Debug)]
pub struct App {
    controller: GameController,
    cursor: Position,
    should_quit: bool,
}

impl App {
    /// Creates an app around `controller` with the cursor in the center.
    #[instrument(skip(controller))]
    pub fn new(controller: GameController) -> Self {
        Self {
            controller,
            cursor: Position::Center,
            should_quit: false,
        }
    }

    /// Current game state.
    pub fn state(&self) -> &GameState {
        self.controller.state()
    }

    /// Cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// True once the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles one key event.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyEvent) {
        let Some(command) = command_for(key, self.cursor) else {
            return;
        };
        debug!(?command, "Key mapped");

        match command {
            Command::Quit => self.should_quit = true,
            Command::MoveCursor(pos) => self.cursor = pos,
            Command::Dispatch(intent) => {
                if let Err(e) = self.controller.dispatch(intent) {
                    // Keys only produce indices 0-8, so this is a bug in the mapping.
                    warn!(error = %e, "Intent rejected");
                }
            }
        }
    }
}
