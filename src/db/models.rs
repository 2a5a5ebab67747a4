//! Database models for key-value entries.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use crate::db::schema;

/// A stored key-value pair.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::kv_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct KvEntry {
    /// Storage key.
    key: String,
    /// JSON-encoded value.
    value: String,
    /// Last write time (UTC).
    updated_at: NaiveDateTime,
}

/// Insertable entry for writing a key.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::kv_entries)]
pub struct NewKvEntry {
    /// Storage key.
    key: String,
    /// JSON-encoded value.
    value: String,
    /// Write time (UTC).
    updated_at: NaiveDateTime,
}
