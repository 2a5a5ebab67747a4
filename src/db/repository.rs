//! Database repository for key-value entries.

use chrono::Utc;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{KvEntry, NewKvEntry, StoreError, StoreOp, schema::kv_entries};

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for key-value operations.
///
/// Each call opens its own connection, so the repository is cheap to clone
/// and holds no open handles between intents.
#[derive(Debug, Clone)]
pub struct KvRepository {
    db_path: String,
}

impl KvRepository {
    /// Opens the database at `db_path`, creating it and applying pending
    /// migrations if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, StoreError> {
        info!(path = %db_path, "Opening key-value store");
        let repo = Self { db_path };
        let mut conn = repo.connection(StoreOp::Open)?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| {
                StoreError::new(StoreOp::Open, repo.target(), format!("Migrations failed: {}", e))
            })?;
        debug!(count = applied.len(), "Migrations applied");
        Ok(repo)
    }

    /// Path of the backing database file.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    fn target(&self) -> String {
        format!("database '{}'", self.db_path)
    }

    /// Establishes a database connection; failures are reported against `op`.
    #[instrument(skip(self))]
    fn connection(&self, op: StoreOp) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| StoreError::new(op, self.target(), format!("Failed to connect: {}", e)))
    }

    /// Gets the value stored under `key`. Returns `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection(StoreOp::Read)?;

        let value = kv_entries::table
            .find(key)
            .select(kv_entries::value)
            .first::<String>(&mut conn)
            .optional()
            .map_err(|e| StoreError::on_key(StoreOp::Read, key, e.to_string()))?;

        debug!(found = value.is_some(), "Key looked up");
        Ok(value)
    }

    /// Gets the full entry stored under `key`, including its timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn entry(&self, key: &str) -> Result<Option<KvEntry>, StoreError> {
        let mut conn = self.connection(StoreOp::Read)?;

        let entry = kv_entries::table
            .find(key)
            .select(KvEntry::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| StoreError::on_key(StoreOp::Read, key, e.to_string()))?;

        Ok(entry)
    }

    /// Writes all `entries` in a single transaction, replacing existing values.
    ///
    /// Either every key is written or none is.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a database error occurs.
    #[instrument(skip(self, entries), fields(count = entries.len()))]
    pub fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        let mut conn = self.connection(StoreOp::Write)?;
        let now = Utc::now().naive_utc();

        conn.transaction::<_, StoreError, _>(|conn| {
            for (key, value) in entries {
                let entry = NewKvEntry::new(key.to_string(), value.clone(), now);
                diesel::insert_into(kv_entries::table)
                    .values(&entry)
                    .on_conflict(kv_entries::key)
                    .do_update()
                    .set((
                        kv_entries::value.eq(entry.value().as_str()),
                        kv_entries::updated_at.eq(now),
                    ))
                    .execute(conn)
                    .map_err(|e| StoreError::on_key(StoreOp::Write, key, e.to_string()))?;
            }
            Ok(())
        })?;

        debug!("Entries written");
        Ok(())
    }

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.connection(StoreOp::Remove)?;
        let removed = diesel::delete(kv_entries::table.find(key))
            .execute(&mut conn)
            .map_err(|e| StoreError::on_key(StoreOp::Remove, key, e.to_string()))?;
        debug!(removed, "Key removed");
        Ok(())
    }

    /// Removes every entry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn clear(&self) -> Result<(), StoreError> {
        let mut conn = self.connection(StoreOp::Clear)?;
        let removed = diesel::delete(kv_entries::table)
            .execute(&mut conn)
            .map_err(|e| StoreError::new(StoreOp::Clear, "all keys", e.to_string()))?;
        info!(removed, "Store cleared");
        Ok(())
    }

    /// Lists stored keys in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut conn = self.connection(StoreOp::List)?;

        let keys = kv_entries::table
            .select(kv_entries::key)
            .order(kv_entries::key.asc())
            .load::<String>(&mut conn)
            .map_err(|e| StoreError::new(StoreOp::List, "all keys", e.to_string()))?;

        debug!(count = keys.len(), "Keys listed");
        Ok(keys)
    }
}
