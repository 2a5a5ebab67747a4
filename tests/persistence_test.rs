//! Saved-game round trips through the persistence adapter and controller.

use std::collections::{HashSet, VecDeque};

use tempfile::NamedTempFile;
use tiktaktu::{
    GameController, GameState, KeyValueStore, KvRepository, MemoryStore, PersistenceAdapter,
    SNAPSHOT_KEYS, STATUS_KEY, WINNER_LINE_KEY,
};
use tiktaktu_core::{Mark, apply_select};

fn setup_test_db() -> (NamedTempFile, KvRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let repo = KvRepository::open(db_path).expect("Failed to open repository");
    (db_file, repo)
}

/// Every state reachable from the empty board by legal play.
fn reachable_states() -> Vec<GameState> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([GameState::new()]);
    let mut states = Vec::new();

    while let Some(state) = queue.pop_front() {
        if !seen.insert(state) {
            continue;
        }
        states.push(state);
        for i in 0..9 {
            let next = apply_select(&state, i).expect("index in range");
            if next != state {
                queue.push_back(next);
            }
        }
    }
    states
}

#[test]
fn test_every_reachable_state_round_trips() {
    let states = reachable_states();
    assert_eq!(states.len(), 5478);

    let adapter = PersistenceAdapter::new(MemoryStore::new());
    for state in states {
        adapter.save(&state);
        assert_eq!(adapter.load(), Some(state));
    }
}

#[test]
fn test_sqlite_round_trip() {
    let (_db, repo) = setup_test_db();
    let adapter = PersistenceAdapter::new(repo.clone());

    for moves in [&[][..], &[4][..], &[0, 3, 1, 4, 2][..], &[0, 1, 2, 4, 3, 5, 7, 6, 8][..]] {
        let state = moves
            .iter()
            .fold(GameState::new(), |s, &i| apply_select(&s, i).unwrap());
        adapter.save(&state);
        assert_eq!(adapter.load(), Some(state));
        assert_eq!(repo.keys().unwrap().len(), SNAPSHOT_KEYS.len());
    }
}

#[test]
fn test_game_resumes_across_sessions() {
    let (_db, repo) = setup_test_db();

    let mut first = GameController::bootstrap(PersistenceAdapter::new(repo.clone()));
    assert_eq!(first.state(), &GameState::new());
    first.select(0).unwrap();
    first.select(4).unwrap();
    let saved = *first.state();
    drop(first);

    let second = GameController::bootstrap(PersistenceAdapter::new(repo));
    assert_eq!(second.state(), &saved);
    assert_eq!(second.state().next_player(), Mark::X);
}

#[test]
fn test_restart_clears_storage() {
    let (_db, repo) = setup_test_db();
    repo.set("leftover", "1".to_string()).unwrap();

    let mut controller = GameController::bootstrap(PersistenceAdapter::new(repo.clone()));
    controller.select(4).unwrap();
    controller.restart();

    assert_eq!(controller.state(), &GameState::new());
    assert_eq!(repo.get("leftover").unwrap(), None);

    let resumed = GameController::bootstrap(PersistenceAdapter::new(repo));
    assert_eq!(resumed.state(), &GameState::new());
}

#[test]
fn test_corrupt_snapshot_falls_back_to_new_game() {
    let (_db, repo) = setup_test_db();
    let mut controller = GameController::bootstrap(PersistenceAdapter::new(repo.clone()));
    for i in [0, 3, 1, 4, 2] {
        controller.select(i).unwrap();
    }
    assert_eq!(controller.state().winner(), Some(Mark::X));

    // Winner kept, line dropped: the pair must travel together.
    repo.set(WINNER_LINE_KEY, "null".to_string()).unwrap();

    let resumed = GameController::bootstrap(PersistenceAdapter::new(repo));
    assert_eq!(resumed.state(), &GameState::new());
}

#[test]
fn test_hand_edited_status_falls_back_to_new_game() {
    let store = MemoryStore::new();
    let adapter = PersistenceAdapter::new(store.clone());
    adapter.save(&apply_select(&GameState::new(), 4).unwrap());
    store.set(STATUS_KEY, "\"Next player: ❌\"".to_string()).unwrap();
    assert_eq!(adapter.load(), None);
}

#[test]
fn test_ignored_select_does_not_write() {
    let (_db, repo) = setup_test_db();
    let mut controller = GameController::bootstrap(PersistenceAdapter::new(repo.clone()));
    controller.select(4).unwrap();
    let written = repo.entry(STATUS_KEY).unwrap().expect("status saved");

    assert_eq!(controller.select(4), Ok(false));
    let after = repo.entry(STATUS_KEY).unwrap().expect("status saved");
    assert_eq!(written.updated_at(), after.updated_at());
}
