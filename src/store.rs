//! Key-value storage seam.
//!
//! The persistence layer only needs string keys mapped to string values.
//! [`KvRepository`] provides the durable implementation; [`MemoryStore`]
//! backs tests and the unpersisted fallback.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::instrument;

use crate::db::{KvRepository, StoreError};

/// String-keyed durable storage.
pub trait KeyValueStore {
    /// Reads the value under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes every entry. Implementations should make this atomic when they can.
    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StoreError>;

    /// Removes `key` if present.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Removes every key.
    fn clear(&self) -> Result<(), StoreError>;

    /// Writes a single entry.
    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.set_many(&[(key, value)])
    }
}

impl KeyValueStore for KvRepository {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        KvRepository::get(self, key)
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        KvRepository::set_many(self, entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        KvRepository::remove(self, key)
    }

    fn clear(&self) -> Result<(), StoreError> {
        KvRepository::clear(self)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        (**self).set_many(entries)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn clear(&self) -> Result<(), StoreError> {
        (**self).clear()
    }
}

/// In-memory store.
///
/// Clones share the same map, so a test can hand one clone to the
/// persistence adapter and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns true if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        let mut map = self.entries.borrow_mut();
        for (key, value) in entries {
            map.insert(key.to_string(), value.clone());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.entries.borrow_mut().clear();
        Ok(())
    }
}
