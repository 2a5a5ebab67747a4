//! SQLite-backed key-value storage.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::{StoreError, StoreOp};
pub use models::{KvEntry, NewKvEntry};
pub use repository::{KvRepository, MIGRATIONS};
