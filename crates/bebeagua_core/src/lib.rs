//! Core domain logic for the BebeAgua water reminder.
//! This crate is the single source of truth for preference and reminder
//! invariants; UI shells reach it through `bebeagua_ffi`.

pub mod db;
pub mod linking;
pub mod logging;
pub mod notification;
pub mod service;
pub mod state;
pub mod store;

pub use linking::{
    decode, encode, DeepLink, DeepLinkDispatcher, DeepLinkHandler, LinkOutcome, LinkSource,
    Navigator, Subscription, UrlParser, DEFAULT_ROUTE,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use notification::{
    reminder_interval_seconds, NotificationCapability, NotificationError, NotificationScheduler,
    Platform,
};
pub use service::{interval_options, FirstLaunch, IntervalOption, PreferenceService};
pub use state::{
    ActionSink, AppAction, AppState, AppStore, HydrationAction, HydrationState,
    NotificationAction, NotificationState, ProfileAction, ThemeAction, ThemeState, UserProfile,
};
pub use store::{
    MemoryPreferenceStore, PreferenceStore, SqlitePreferenceStore, StoreError, StoreResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
