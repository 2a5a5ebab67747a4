//! Bridges game state to durable key-value storage.

use tiktaktu_core::{GameState, Transition};
use tracing::{debug, info, instrument, warn};

use crate::controller::StateSubscriber;
use crate::snapshot::{SNAPSHOT_KEYS, Snapshot, SnapshotError};
use crate::store::KeyValueStore;

/// Loads the saved game at startup and writes it back after every change.
///
/// Storage failures never reach the caller: reads fall back to "no saved
/// game" and writes are logged and dropped.
#[derive(Debug, Clone)]
pub struct PersistenceAdapter<S> {
    store: S,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    /// Creates an adapter over `store`.
    #[instrument(skip(store))]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads the saved game.
    ///
    /// Returns `None` when nothing is stored, when storage cannot be read,
    /// or when the stored snapshot is inconsistent. Callers fall back to
    /// [`GameState::new`].
    #[instrument(skip(self))]
    pub fn load(&self) -> Option<GameState> {
        match Snapshot::read(&self.store).and_then(Snapshot::into_state) {
            Ok(state) => {
                info!(status = %state.status(), "Saved game restored");
                Some(state)
            }
            Err(SnapshotError::Empty) => {
                info!("No saved game");
                None
            }
            Err(e) => {
                warn!(error = %e, "Discarding saved game");
                None
            }
        }
    }

    /// Writes all five snapshot keys for `state`.
    #[instrument(skip(self, state), fields(status = %state.status()))]
    pub fn save(&self, state: &GameState) {
        let entries = match Snapshot::from_state(state).encode() {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "Failed to encode snapshot");
                return;
            }
        };

        match self.store.set_many(&entries) {
            Ok(()) => debug!("Snapshot saved"),
            Err(e) => warn!(error = %e, "Failed to save snapshot"),
        }
    }

    /// Removes every persisted key.
    #[instrument(skip(self))]
    pub fn clear(&self) {
        match self.store.clear() {
            Ok(()) => debug!(keys = ?SNAPSHOT_KEYS, "Saved game cleared"),
            Err(e) => warn!(error = %e, "Failed to clear saved game"),
        }
    }
}

impl<S: KeyValueStore> StateSubscriber for PersistenceAdapter<S> {
    fn on_transition(&mut self, transition: &Transition) {
        match transition {
            Transition::Ignored => {}
            Transition::Moved(state) => self.save(state),
            Transition::Restarted(state) => {
                self.clear();
                self.save(state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{StoreError, StoreOp};
    use crate::snapshot::{SQUARES_KEY, STATUS_KEY, WINNER_KEY};
    use crate::store::MemoryStore;
    use tiktaktu_core::{Intent, apply_select, reduce};

    /// Store whose every operation fails.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::new(StoreOp::Write, "everything", "disk on fire"))
        }

        fn set_many(&self, _entries: &[(&str, String)]) -> Result<(), StoreError> {
            Err(StoreError::new(StoreOp::Write, "everything", "disk on fire"))
        }

        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::new(StoreOp::Write, "everything", "disk on fire"))
        }

        fn clear(&self) -> Result<(), StoreError> {
            Err(StoreError::new(StoreOp::Write, "everything", "disk on fire"))
        }
    }

    #[test]
    fn test_load_empty_store_is_none() {
        let adapter = PersistenceAdapter::new(MemoryStore::new());
        assert_eq!(adapter.load(), None);
    }

    #[test]
    fn test_save_writes_all_five_keys() {
        let store = MemoryStore::new();
        let adapter = PersistenceAdapter::new(store.clone());
        adapter.save(&GameState::new());
        assert_eq!(store.len(), SNAPSHOT_KEYS.len());
        assert_eq!(store.get(WINNER_KEY).unwrap().as_deref(), Some("null"));
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let adapter = PersistenceAdapter::new(MemoryStore::new());
        let state = [4, 0, 8, 2, 1]
            .iter()
            .fold(GameState::new(), |s, &i| apply_select(&s, i).unwrap());
        adapter.save(&state);
        assert_eq!(adapter.load(), Some(state));
    }

    #[test]
    fn test_load_rejects_corrupt_snapshot() {
        let store = MemoryStore::new();
        let adapter = PersistenceAdapter::new(store.clone());
        adapter.save(&apply_select(&GameState::new(), 4).unwrap());
        store.set(STATUS_KEY, r#""Winner: ⭕""#.to_string()).unwrap();
        assert_eq!(adapter.load(), None);
    }

    #[test]
    fn test_clear_removes_everything() {
        let store = MemoryStore::new();
        let adapter = PersistenceAdapter::new(store.clone());
        adapter.save(&GameState::new());
        store.set("unrelated", "1".to_string()).unwrap();
        adapter.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_broken_store_degrades_silently() {
        let adapter = PersistenceAdapter::new(BrokenStore);
        adapter.save(&GameState::new());
        adapter.clear();
        assert_eq!(adapter.load(), None);
    }

    #[test]
    fn test_subscriber_saves_moves_and_ignores_no_ops() {
        let store = MemoryStore::new();
        let mut adapter = PersistenceAdapter::new(store.clone());

        adapter.on_transition(&Transition::Ignored);
        assert!(store.is_empty());

        let transition = reduce(&GameState::new(), Intent::Select(0)).unwrap();
        adapter.on_transition(&transition);
        assert_eq!(
            store.get(SQUARES_KEY).unwrap().as_deref(),
            Some(r#"["❌",null,null,null,null,null,null,null,null]"#)
        );
    }

    #[test]
    fn test_subscriber_restart_clears_then_saves_fresh_game() {
        let store = MemoryStore::new();
        let mut adapter = PersistenceAdapter::new(store.clone());
        store.set("stale", "1".to_string()).unwrap();

        let played = apply_select(&GameState::new(), 4).unwrap();
        let transition = reduce(&played, Intent::Restart).unwrap();
        adapter.on_transition(&transition);

        assert_eq!(store.get("stale").unwrap(), None);
        assert_eq!(adapter.load(), Some(GameState::new()));
    }
}
