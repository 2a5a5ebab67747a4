//! Storage error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Storage operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StoreOp {
    /// Opening or migrating the database.
    #[display("open")]
    Open,
    /// Reading a key.
    #[display("read")]
    Read,
    /// Writing one or more keys.
    #[display("write")]
    Write,
    /// Removing a key.
    #[display("remove")]
    Remove,
    /// Removing every key.
    #[display("clear")]
    Clear,
    /// Listing keys.
    #[display("list")]
    List,
    /// Beginning or committing a transaction.
    #[display("transaction")]
    Transaction,
}

/// Storage error with the failed operation, its target and caller location.
#[derive(Debug, Clone, Display, Error)]
#[display("Storage error: {} {} failed: {} at {}:{}", op, target, message, file, line)]
pub struct StoreError {
    /// Operation that failed.
    pub op: StoreOp,
    /// What the operation targeted, e.g. `key 'squares'`.
    pub target: String,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new storage error with caller location tracking.
    #[track_caller]
    #[instrument(skip(target, message))]
    pub fn new(op: StoreOp, target: impl Into<String>, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            op,
            target: target.into(),
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Creates an error for an operation on a single key.
    #[track_caller]
    pub fn on_key(op: StoreOp, key: &str, message: impl Into<String>) -> Self {
        Self::new(op, format!("key '{}'", key), message)
    }
}

impl From<diesel::result::Error> for StoreError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(StoreOp::Transaction, "kv_entries", err.to_string())
    }
}
