//! Reducer state persisted through a [`PreferenceStore`].
//!
//! # Invariants
//! - Sync is one-way: read once at load, written after every dispatch.
//! - A failed write keeps the in-memory state (last write wins on disk).
//! - A missing or corrupt blob yields default state, never an error.

use crate::state::{ActionSink, AppAction, AppState, AppStore};
use crate::store::{PreferenceStore, StoreResult, PERSISTED_STATE_KEY};
use log::{debug, error, info, warn};
use std::rc::Rc;

/// Reads the persisted reducer blob, if any.
pub fn load_persisted_state(store: &impl PreferenceStore) -> StoreResult<Option<AppState>> {
    let Some(raw) = store.get(PERSISTED_STATE_KEY)? else {
        return Ok(None);
    };
    let state = serde_json::from_str::<AppState>(&raw)?;
    Ok(Some(state))
}

/// Owns the app state holder and keeps the store in sync with it.
pub struct PreferenceService<S: PreferenceStore> {
    store: S,
    app: Rc<AppStore>,
}

impl<S: PreferenceStore> PreferenceService<S> {
    /// Hydrates state from `store`, falling back to defaults.
    pub fn load(store: S) -> Self {
        let state = match load_persisted_state(&store) {
            Ok(Some(state)) => {
                info!("event=state_hydrate module=service status=ok source=store");
                state
            }
            Ok(None) => {
                info!("event=state_hydrate module=service status=ok source=default");
                AppState::default()
            }
            Err(err) => {
                warn!("event=state_hydrate module=service status=error fallback=default error={err}");
                AppState::default()
            }
        };

        Self {
            store,
            app: Rc::new(AppStore::new(state)),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Shared state holder, e.g. for listeners or the deep-link handler.
    pub fn app(&self) -> &Rc<AppStore> {
        &self.app
    }

    pub fn state(&self) -> AppState {
        self.app.state()
    }

    /// Applies `action` and writes the new state back.
    ///
    /// Returns `false` when the write failed; the in-memory state is kept.
    pub fn dispatch(&self, action: impl Into<AppAction>) -> bool {
        self.app.dispatch(action.into());
        self.persist_logged()
    }

    /// Writes the current state blob.
    pub fn persist(&self) -> StoreResult<()> {
        let raw = serde_json::to_string(&self.app.state())?;
        self.store.set(PERSISTED_STATE_KEY, &raw)?;
        debug!("event=state_persist module=service status=ok bytes={}", raw.len());
        Ok(())
    }

    pub(crate) fn persist_logged(&self) -> bool {
        match self.persist() {
            Ok(()) => true,
            Err(err) => {
                error!("event=state_persist module=service status=error error={err}");
                false
            }
        }
    }
}

impl<S: PreferenceStore> ActionSink for PreferenceService<S> {
    fn dispatch(&self, action: AppAction) {
        self.app.dispatch(action);
        self.persist_logged();
    }
}
