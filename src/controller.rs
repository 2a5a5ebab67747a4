//! Game controller: owns the current state and fans out transitions.

use tiktaktu_core::{EngineError, GameState, Intent, Transition, reduce};
use tracing::{debug, info, instrument, warn};

use crate::persistence::PersistenceAdapter;
use crate::store::KeyValueStore;

/// Observer notified synchronously after every accepted transition.
pub trait StateSubscriber {
    /// Called once per accepted transition, after the controller has
    /// replaced its state. Never called for [`Transition::Ignored`].
    fn on_transition(&mut self, transition: &Transition);
}

/// Owns the single [`GameState`] and applies intents to it.
///
/// The view reads [`GameController::state`] and sends intents through
/// [`GameController::dispatch`]. Subscribers run in registration order
/// before `dispatch` returns.
pub struct GameController {
    state: GameState,
    subscribers: Vec<Box<dyn StateSubscriber>>,
}

impl GameController {
    /// Creates a controller starting from `initial`.
    #[instrument(skip(initial), fields(status = %initial.status()))]
    pub fn new(initial: GameState) -> Self {
        info!("Creating GameController");
        Self {
            state: initial,
            subscribers: Vec::new(),
        }
    }

    /// Restores the saved game from `adapter` (or starts fresh) and
    /// subscribes the adapter so every later change is persisted.
    #[instrument(skip(adapter))]
    pub fn bootstrap<S: KeyValueStore + 'static>(adapter: PersistenceAdapter<S>) -> Self {
        let initial = adapter.load().unwrap_or_default();
        let mut controller = Self::new(initial);
        controller.subscribe(Box::new(adapter));
        controller
    }

    /// Registers a subscriber.
    pub fn subscribe(&mut self, subscriber: Box<dyn StateSubscriber>) {
        self.subscribers.push(subscriber);
        debug!(count = self.subscribers.len(), "Subscriber registered");
    }

    /// Returns the current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Applies `intent` to the current state.
    ///
    /// Returns `Ok(false)` when the intent was a no-op (occupied square or
    /// finished game) and `Ok(true)` when the state changed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidIndex`] for a selection outside 0-8;
    /// the state is left unchanged.
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, intent: Intent) -> Result<bool, EngineError> {
        let transition = reduce(&self.state, intent)?;

        let Some(next) = transition.state() else {
            debug!("Intent ignored");
            return Ok(false);
        };

        self.state = *next;
        info!(status = %self.state.status(), "State changed");

        for subscriber in &mut self.subscribers {
            subscriber.on_transition(&transition);
        }
        Ok(true)
    }

    /// Selects the square at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidIndex`] for an index outside 0-8.
    pub fn select(&mut self, index: usize) -> Result<bool, EngineError> {
        self.dispatch(Intent::Select(index))
    }

    /// Starts a fresh game.
    pub fn restart(&mut self) {
        if let Err(e) = self.dispatch(Intent::Restart) {
            warn!(error = %e, "Restart rejected");
        }
    }
}

impl std::fmt::Debug for GameController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameController")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every transition it sees, tagged with its name.
    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<(&'static str, Transition)>>>,
    }

    impl StateSubscriber for Recorder {
        fn on_transition(&mut self, transition: &Transition) {
            self.log.borrow_mut().push((self.name, transition.clone()));
        }
    }

    fn recorded_controller() -> (GameController, Rc<RefCell<Vec<(&'static str, Transition)>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut controller = GameController::new(GameState::new());
        for name in ["first", "second"] {
            controller.subscribe(Box::new(Recorder {
                name,
                log: Rc::clone(&log),
            }));
        }
        (controller, log)
    }

    #[test]
    fn test_subscribers_run_in_order_after_state_change() {
        let (mut controller, log) = recorded_controller();
        assert_eq!(controller.select(4), Ok(true));

        let log = log.borrow();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].0, "first");
        assert_eq!(log[1].0, "second");
        assert_eq!(log[0].1, Transition::Moved(*controller.state()));
    }

    #[test]
    fn test_ignored_select_notifies_nobody() {
        let (mut controller, log) = recorded_controller();
        controller.select(4).unwrap();
        assert_eq!(controller.select(4), Ok(false));
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_invalid_index_leaves_state_untouched() {
        let (mut controller, log) = recorded_controller();
        assert_eq!(controller.select(9), Err(EngineError::InvalidIndex(9)));
        assert_eq!(controller.state(), &GameState::new());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_restart_from_finished_game_resets_state() {
        let (mut controller, log) = recorded_controller();
        for index in [0, 3, 1, 4, 2] {
            assert_eq!(controller.select(index), Ok(true));
        }
        assert!(controller.state().winner().is_some());

        controller.restart();
        assert_eq!(controller.state(), &GameState::new());
        // Five moves plus the restart, seen by both subscribers.
        assert_eq!(log.borrow().len(), 12);
    }

    #[test]
    fn test_restart_notifies_with_restarted() {
        let (mut controller, log) = recorded_controller();
        controller.select(0).unwrap();
        controller.restart();
        assert_eq!(controller.state(), &GameState::new());
        assert_eq!(
            log.borrow().last().map(|(_, t)| t.clone()),
            Some(Transition::Restarted(GameState::new()))
        );
    }
}
