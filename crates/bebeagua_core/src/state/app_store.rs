//! Explicit state holder with a listener list.
//!
//! Components receive `&AppStore` (or `Rc<AppStore>`) instead of reading an
//! ambient global. Single-threaded: interior mutability via `RefCell`.

use super::{reduce, AppAction, AppState};
use log::debug;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Receiver of domain actions (state holder, recorder in tests).
pub trait ActionSink {
    fn dispatch(&self, action: AppAction);
}

impl<T: ActionSink + ?Sized> ActionSink for Rc<T> {
    fn dispatch(&self, action: AppAction) {
        (**self).dispatch(action)
    }
}

/// Handle returned by [`AppStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

type Listener = Rc<dyn Fn(&AppState)>;

/// Owns the current [`AppState`] and notifies listeners after each change.
pub struct AppStore {
    state: RefCell<AppState>,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_listener_id: Cell<u64>,
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl AppStore {
    pub fn new(initial: AppState) -> Self {
        Self {
            state: RefCell::new(initial),
            listeners: RefCell::new(Vec::new()),
            next_listener_id: Cell::new(1),
        }
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Replaces the whole state (startup hydration) and notifies listeners.
    pub fn replace(&self, state: AppState) {
        *self.state.borrow_mut() = state;
        self.notify();
    }

    /// Registers a listener called with the new state after every change.
    pub fn subscribe(&self, listener: impl Fn(&AppState) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id.get());
        self.next_listener_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` when the id was unknown.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn notify(&self) {
        let snapshot = self.state();
        // Callbacks may subscribe or unsubscribe; changes apply from the
        // next notification.
        let listeners = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect::<Vec<_>>();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

impl ActionSink for AppStore {
    fn dispatch(&self, action: AppAction) {
        let name = action.name();
        let next = reduce(&self.state.borrow(), action);
        *self.state.borrow_mut() = next;
        debug!("event=action_dispatch module=state status=ok action={name}");
        self.notify();
    }
}
