//! Preference state slices, actions and the in-process state holder.
//!
//! # Responsibility
//! - Define the whitelisted slices persisted across launches.
//! - Keep every transition a pure `(state, action) -> state` function.
//!
//! # Invariants
//! - Reducers never mutate their input and handle every declared action.
//! - `AppState` serializes to the persisted blob shape
//!   (`water`, `theme`, `notification`, `user`).

pub mod app_store;
pub mod hydration;
pub mod notification;
pub mod profile;
pub mod theme;

use serde::{Deserialize, Serialize};

pub use app_store::{ActionSink, AppStore, ListenerId};
pub use hydration::{GlassLevel, HydrationAction, HydrationState};
pub use notification::{NotificationAction, NotificationState};
pub use profile::{ProfileAction, UserProfile};
pub use theme::{ColorScheme, ThemeAction, ThemeState};

/// Combined reducer-backed state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub water: HydrationState,
    pub theme: ThemeState,
    pub notification: NotificationState,
    pub user: UserProfile,
}

/// Command routed to exactly one slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Hydration(HydrationAction),
    Theme(ThemeAction),
    Notification(NotificationAction),
    Profile(ProfileAction),
}

impl From<HydrationAction> for AppAction {
    fn from(value: HydrationAction) -> Self {
        Self::Hydration(value)
    }
}

impl From<ThemeAction> for AppAction {
    fn from(value: ThemeAction) -> Self {
        Self::Theme(value)
    }
}

impl From<NotificationAction> for AppAction {
    fn from(value: NotificationAction) -> Self {
        Self::Notification(value)
    }
}

impl From<ProfileAction> for AppAction {
    fn from(value: ProfileAction) -> Self {
        Self::Profile(value)
    }
}

impl AppAction {
    /// Stable action name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hydration(HydrationAction::AddGlass) => "water/addGlass",
            Self::Hydration(HydrationAction::RemoveGlass) => "water/removeGlass",
            Self::Hydration(HydrationAction::Reset) => "water/reset",
            Self::Hydration(HydrationAction::SetGoal(_)) => "water/setGoal",
            Self::Hydration(HydrationAction::SetGlasses(_)) => "water/setGlasses",
            Self::Theme(ThemeAction::SetDarkMode(_)) => "theme/setDarkMode",
            Self::Theme(ThemeAction::SetLoading(_)) => "theme/setLoading",
            Self::Notification(NotificationAction::SetEnabled(_)) => "notification/setEnabled",
            Self::Notification(NotificationAction::SetReminderInterval(_)) => {
                "notification/setReminderInterval"
            }
            Self::Profile(ProfileAction::SetName(_)) => "user/setName",
            Self::Profile(ProfileAction::SetAge(_)) => "user/setAge",
            Self::Profile(ProfileAction::SetEmail(_)) => "user/setEmail",
            Self::Profile(ProfileAction::SetPhone(_)) => "user/setPhone",
        }
    }
}

/// Root reducer: delegates to the slice named by the action.
pub fn reduce(state: &AppState, action: AppAction) -> AppState {
    let mut next = state.clone();
    match action {
        AppAction::Hydration(action) => next.water = hydration::reduce(&state.water, action),
        AppAction::Theme(action) => next.theme = theme::reduce(&state.theme, action),
        AppAction::Notification(action) => {
            next.notification = notification::reduce(&state.notification, action)
        }
        AppAction::Profile(action) => next.user = profile::reduce(&state.user, action),
    }
    next
}

#[cfg(test)]
mod tests {
    use super::{reduce, AppAction, AppState, HydrationAction, ThemeAction};

    #[test]
    fn root_reducer_only_touches_target_slice() {
        let initial = AppState::default();
        let next = reduce(&initial, HydrationAction::AddGlass.into());

        assert_eq!(next.water.glasses, 1);
        assert_eq!(next.theme, initial.theme);
        assert_eq!(next.notification, initial.notification);
        assert_eq!(next.user, initial.user);
        assert_eq!(initial.water.glasses, 0);
    }

    #[test]
    fn action_names_follow_slice_prefix() {
        assert_eq!(
            AppAction::from(ThemeAction::SetDarkMode(None)).name(),
            "theme/setDarkMode"
        );
        assert_eq!(
            AppAction::from(HydrationAction::Reset).name(),
            "water/reset"
        );
    }

    #[test]
    fn serializes_to_whitelisted_blob_shape() {
        let value = serde_json::to_value(AppState::default()).expect("serialize state");
        assert_eq!(value["water"]["goal"], 12);
        assert_eq!(value["theme"]["darkMode"], serde_json::Value::Null);
        assert_eq!(value["theme"]["isLoading"], true);
        assert_eq!(value["notification"]["reminderInterval"], 3_600_000);
        assert_eq!(value["user"]["name"], "");
    }

    #[test]
    fn missing_slices_fall_back_to_defaults() {
        let state: AppState =
            serde_json::from_str(r#"{"water":{"glasses":4}}"#).expect("partial blob");
        assert_eq!(state.water.glasses, 4);
        assert_eq!(state.water.goal, 12);
        assert!(state.notification.enabled);
    }
}
