//! Saved-game snapshot codec.
//!
//! A snapshot is five independent keys, each holding a JSON value:
//!
//! | key          | value                                       |
//! |--------------|---------------------------------------------|
//! | `squares`    | array of 9 `null` / `"❌"` / `"⭕"`          |
//! | `nextPlayer` | `"❌"` or `"⭕"`                              |
//! | `winner`     | `null` or a mark                            |
//! | `winnerLine` | `null` or 3 board indices                   |
//! | `status`     | status text, e.g. `"Next player: ❌"`        |

use derive_getters::Getters;
use serde::de::DeserializeOwned;
use tiktaktu_core::{Board, GameState, Line, Mark, StateError, Win};
use tracing::{debug, instrument};

use crate::db::StoreError;
use crate::store::KeyValueStore;

/// Key holding the board.
pub const SQUARES_KEY: &str = "squares";
/// Key holding the next player.
pub const NEXT_PLAYER_KEY: &str = "nextPlayer";
/// Key holding the winner.
pub const WINNER_KEY: &str = "winner";
/// Key holding the winning line.
pub const WINNER_LINE_KEY: &str = "winnerLine";
/// Key holding the status text.
pub const STATUS_KEY: &str = "status";

/// Every key a snapshot writes, in write order.
pub const SNAPSHOT_KEYS: [&str; 5] = [
    SQUARES_KEY,
    NEXT_PLAYER_KEY,
    WINNER_KEY,
    WINNER_LINE_KEY,
    STATUS_KEY,
];

/// Why a stored snapshot was rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SnapshotError {
    /// No saved game at all.
    #[display("No saved game")]
    Empty,

    /// A required key is absent.
    #[display("Missing key '{}'", _0)]
    Missing(&'static str),

    /// A key holds JSON that does not decode to the expected type.
    #[display("Key '{}' is not valid: {}", key, message)]
    Decode {
        /// Offending key.
        key: &'static str,
        /// Decoder message.
        message: String,
    },

    /// The store could not be read.
    #[display("Read failed: {}", _0)]
    Read(String),

    /// The board could not arise from alternating play starting with X.
    #[display("Unreachable board: {}", _0)]
    Unreachable(String),

    /// Stored next player disagrees with the board.
    #[display("Next player {} does not match board (expected {})", stored, expected)]
    NextPlayerMismatch {
        /// Value in storage.
        stored: Mark,
        /// Value implied by the board.
        expected: Mark,
    },

    /// Stored winner or winning line disagrees with the board.
    #[display("Stored winner does not match board")]
    WinnerMismatch,

    /// Stored status text disagrees with the board.
    #[display("Status '{}' does not match board (expected '{}')", stored, expected)]
    StatusMismatch {
        /// Value in storage.
        stored: String,
        /// Value implied by the board.
        expected: String,
    },
}

impl std::error::Error for SnapshotError {}

impl From<StateError> for SnapshotError {
    fn from(err: StateError) -> Self {
        match err {
            StateError::NextPlayerMismatch { given, expected } => Self::NextPlayerMismatch {
                stored: given,
                expected,
            },
            StateError::WinMismatch => Self::WinnerMismatch,
            unreachable => Self::Unreachable(unreachable.to_string()),
        }
    }
}

impl From<StoreError> for SnapshotError {
    fn from(err: StoreError) -> Self {
        Self::Read(err.to_string())
    }
}

/// Decoded contents of the five snapshot keys.
///
/// Fields are exactly what storage held; nothing has been cross-checked yet.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Snapshot {
    /// Stored board.
    squares: Board,
    /// Stored next player.
    next_player: Mark,
    /// Stored winner, `None` for JSON `null`.
    winner: Option<Mark>,
    /// Stored winning line, `None` for JSON `null`.
    winner_line: Option<Line>,
    /// Stored status text.
    status: String,
}

impl Snapshot {
    /// Captures a state for writing.
    #[instrument(skip(state))]
    pub fn from_state(state: &GameState) -> Self {
        Self {
            squares: *state.board(),
            next_player: state.next_player(),
            winner: state.winner(),
            winner_line: state.winner_line(),
            status: state.status().to_string(),
        }
    }

    /// Encodes each field as JSON under its key.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if a field fails to serialize.
    #[instrument(skip(self))]
    pub fn encode(&self) -> Result<[(&'static str, String); 5], serde_json::Error> {
        Ok([
            (SQUARES_KEY, serde_json::to_string(&self.squares)?),
            (NEXT_PLAYER_KEY, serde_json::to_string(&self.next_player)?),
            (WINNER_KEY, serde_json::to_string(&self.winner)?),
            (WINNER_LINE_KEY, serde_json::to_string(&self.winner_line)?),
            (STATUS_KEY, serde_json::to_string(&self.status)?),
        ])
    }

    /// Reads and decodes the five keys from `store`.
    ///
    /// A missing `winner` or `winnerLine` key decodes as `null`.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Empty`] when no key is present, and another
    /// [`SnapshotError`] when a key is missing, unreadable, or malformed.
    #[instrument(skip(store))]
    pub fn read<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self, SnapshotError> {
        let squares: Option<Board> = decode_key(store, SQUARES_KEY)?;
        let next_player: Option<Mark> = decode_key(store, NEXT_PLAYER_KEY)?;
        let winner: Option<Option<Mark>> = decode_key(store, WINNER_KEY)?;
        let winner_line: Option<Option<Line>> = decode_key(store, WINNER_LINE_KEY)?;
        let status: Option<String> = decode_key(store, STATUS_KEY)?;

        if squares.is_none()
            && next_player.is_none()
            && winner.is_none()
            && winner_line.is_none()
            && status.is_none()
        {
            return Err(SnapshotError::Empty);
        }

        Ok(Self {
            squares: squares.ok_or(SnapshotError::Missing(SQUARES_KEY))?,
            next_player: next_player.ok_or(SnapshotError::Missing(NEXT_PLAYER_KEY))?,
            winner: winner.flatten(),
            winner_line: winner_line.flatten(),
            status: status.ok_or(SnapshotError::Missing(STATUS_KEY))?,
        })
    }

    /// Rebuilds the game state, rejecting snapshots that break its invariants.
    ///
    /// The board is the source of truth. The stored next player, winner,
    /// winning line and status must all equal what the board implies, and
    /// the board itself must be reachable by alternating play from X.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    #[instrument(skip(self))]
    pub fn into_state(self) -> Result<GameState, SnapshotError> {
        let win = match (self.winner, self.winner_line) {
            (Some(mark), Some(line)) => Some(Win::new(mark, line)),
            (None, None) => None,
            _ => return Err(SnapshotError::WinnerMismatch),
        };

        let state = GameState::from_parts(self.squares, self.next_player, win)?;

        let expected = state.status().to_string();
        if self.status != expected {
            return Err(SnapshotError::StatusMismatch {
                stored: self.status,
                expected,
            });
        }

        debug!(status = %expected, "Snapshot accepted");
        Ok(state)
    }
}

/// Reads `key` and decodes it as JSON. Absent keys and JSON `null` for a
/// non-optional type are both reported as absent.
fn decode_key<S, T>(store: &S, key: &'static str) -> Result<Option<T>, SnapshotError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    if raw.trim() == "null" {
        // `winner`/`winnerLine` use null for "no winner"; wrap it so the
        // caller can tell a stored null from an absent key.
        return serde_json::from_str::<T>(&raw)
            .map(Some)
            .or(Ok(None));
    }

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| SnapshotError::Decode {
            key,
            message: e.to_string(),
        })
}
