//! The move reducer.
//!
//! Every function here is pure: it takes the current state by reference
//! and returns a new one. The caller decides what to do with it.

use super::action::{EngineError, Intent, Transition};
use super::{GameState, Position};
use tracing::{debug, instrument};

/// Places the next player's mark at `index`.
///
/// Selecting an occupied square, or any square after the game has been won,
/// returns the state unchanged. That is not an error.
///
/// # Errors
///
/// Returns [`EngineError::InvalidIndex`] if `index` is outside 0-8.
#[instrument(skip(state), fields(next_player = %state.next_player()))]
pub fn apply_select(state: &GameState, index: usize) -> Result<GameState, EngineError> {
    let pos = Position::try_from(index)?;

    if !state.accepts(pos) {
        debug!(position = %pos, "Selection ignored");
        return Ok(*state);
    }

    let board = state.board().with_mark(pos, state.next_player());
    let next = GameState::from_board(board);
    debug!(position = %pos, status = %next.status(), "Mark placed");
    Ok(next)
}

/// Returns the canonical empty game regardless of `_state`.
#[instrument(skip(_state))]
pub fn apply_restart(_state: &GameState) -> GameState {
    GameState::new()
}

/// Reduces an intent against `state`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidIndex`] for a selection outside 0-8.
#[instrument(skip(state))]
pub fn reduce(state: &GameState, intent: Intent) -> Result<Transition, EngineError> {
    match intent {
        Intent::Select(index) => {
            let next = apply_select(state, index)?;
            if next == *state {
                Ok(Transition::Ignored)
            } else {
                Ok(Transition::Moved(next))
            }
        }
        Intent::Restart => Ok(Transition::Restarted(apply_restart(state))),
    }
}
