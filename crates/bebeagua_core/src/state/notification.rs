//! Reminder notification preference slice.
//!
//! The interval lives in milliseconds here and is only converted to seconds
//! at the OS scheduling boundary.

use serde::{Deserialize, Serialize};

/// One hour.
pub const DEFAULT_REMINDER_INTERVAL_MS: i64 = 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationState {
    pub enabled: bool,
    #[serde(rename = "reminderInterval")]
    pub reminder_interval_ms: i64,
}

impl Default for NotificationState {
    fn default() -> Self {
        Self {
            enabled: true,
            reminder_interval_ms: DEFAULT_REMINDER_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAction {
    SetEnabled(bool),
    /// Interval in milliseconds. Stored as-is, even while disabled.
    SetReminderInterval(i64),
}

pub fn reduce(state: &NotificationState, action: NotificationAction) -> NotificationState {
    let mut next = *state;
    match action {
        NotificationAction::SetEnabled(enabled) => next.enabled = enabled,
        NotificationAction::SetReminderInterval(interval_ms) => {
            next.reminder_interval_ms = interval_ms
        }
    }
    next
}

impl NotificationState {
    pub fn reminder_interval_minutes(&self) -> f64 {
        self.reminder_interval_ms as f64 / 60_000.0
    }
}
