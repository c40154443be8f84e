//! First-launch (onboarding) marker.
//!
//! # Invariants
//! - Marker absent => first launch; marker present => not first launch.
//! - A read failure reports "not first launch" so onboarding is not shown
//!   again on every start when storage is broken.
//! - Write/remove failures are logged and swallowed.

use crate::store::{PreferenceStore, TUTORIAL_SEEN_KEY};
use log::{error, info, warn};
use std::cell::Cell;

/// Tracks whether onboarding still has to be shown.
pub struct FirstLaunch<S: PreferenceStore> {
    store: S,
    is_first_launch: Cell<Option<bool>>,
    is_loading: Cell<bool>,
}

impl<S: PreferenceStore> FirstLaunch<S> {
    /// Creates an unresolved tracker; call [`FirstLaunch::check`] to resolve.
    pub fn new(store: S) -> Self {
        Self {
            store,
            is_first_launch: Cell::new(None),
            is_loading: Cell::new(true),
        }
    }

    /// `None` until the first [`FirstLaunch::check`] completes.
    pub fn is_first_launch(&self) -> Option<bool> {
        self.is_first_launch.get()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading.get()
    }

    /// Reads the marker and resolves the first-launch flag.
    pub fn check(&self) -> bool {
        let first_launch = match self.store.get(TUTORIAL_SEEN_KEY) {
            Ok(marker) => marker.is_none(),
            Err(err) => {
                warn!("event=first_launch_check module=service status=error fallback=seen error={err}");
                false
            }
        };
        self.is_first_launch.set(Some(first_launch));
        self.is_loading.set(false);
        info!("event=first_launch_check module=service status=ok first_launch={first_launch}");
        first_launch
    }

    /// Persists the marker after onboarding was shown.
    pub fn mark_seen(&self) {
        match self.store.set(TUTORIAL_SEEN_KEY, "true") {
            Ok(()) => {
                self.is_first_launch.set(Some(false));
                info!("event=tutorial_mark_seen module=service status=ok");
            }
            Err(err) => {
                error!("event=tutorial_mark_seen module=service status=error error={err}");
            }
        }
    }

    /// Removes the marker so onboarding shows again.
    pub fn reset_tutorial(&self) {
        match self.store.remove(TUTORIAL_SEEN_KEY) {
            Ok(()) => {
                self.is_first_launch.set(Some(true));
                info!("event=tutorial_reset module=service status=ok");
            }
            Err(err) => {
                error!("event=tutorial_reset module=service status=error error={err}");
            }
        }
    }
}
