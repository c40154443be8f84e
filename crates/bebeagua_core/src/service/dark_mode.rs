//! Tri-state dark-mode preference stored under its own key.
//!
//! `"true"` / `"false"` are explicit choices; an absent key means "follow the
//! system". The theme slice mirrors the key after load and after each
//! successful change.

use super::PreferenceService;
use crate::state::{ActionSink, ThemeAction};
use crate::store::{PreferenceStore, DARK_MODE_KEY};
use log::{error, info, warn};

impl<S: PreferenceStore> PreferenceService<S> {
    /// Reads the dark-mode key into the theme slice and clears `is_loading`.
    ///
    /// On read failure the current preference is kept; loading still ends.
    pub fn load_dark_mode(&self) -> Option<bool> {
        match self.store().get(DARK_MODE_KEY) {
            Ok(raw) => {
                let value = match raw.as_deref() {
                    Some("true") => Some(true),
                    Some("false") => Some(false),
                    Some(_) => {
                        warn!("event=dark_mode_load module=service status=ignored reason=unknown_value");
                        None
                    }
                    None => None,
                };
                self.app().dispatch(ThemeAction::SetDarkMode(value).into());
                info!("event=dark_mode_load module=service status=ok");
            }
            Err(err) => {
                error!("event=dark_mode_load module=service status=error error={err}");
            }
        }
        self.dispatch(ThemeAction::SetLoading(false));
        self.state().theme.dark_mode
    }

    /// Stores the preference, then mirrors it into state.
    ///
    /// State is left untouched when the write fails.
    pub fn set_dark_mode(&self, value: Option<bool>) -> bool {
        let written = match value {
            Some(enabled) => self
                .store()
                .set(DARK_MODE_KEY, if enabled { "true" } else { "false" }),
            None => self.store().remove(DARK_MODE_KEY),
        };

        if let Err(err) = written {
            error!("event=dark_mode_save module=service status=error error={err}");
            return false;
        }
        self.dispatch(ThemeAction::SetDarkMode(value));
        true
    }
}
