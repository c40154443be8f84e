//! Core use-case services.
//!
//! # Responsibility
//! - Bridge reducer state and the preference store (load at startup, write
//!   back on change).
//! - Own fail-safe policies: storage and notification failures are logged
//!   and turned into safe defaults.

pub mod dark_mode;
pub mod first_launch;
pub mod preference_service;
pub mod reminder_settings;

pub use first_launch::FirstLaunch;
pub use preference_service::{load_persisted_state, PreferenceService};
pub use reminder_settings::{interval_options, IntervalOption};
