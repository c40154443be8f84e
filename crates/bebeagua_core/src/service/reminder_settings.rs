//! Reminder settings use-cases: store the preference, then (re)schedule.

use super::PreferenceService;
use crate::notification::{NotificationCapability, NotificationScheduler};
use crate::state::NotificationAction;
use crate::store::PreferenceStore;

/// Selectable reminder interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalOption {
    pub label: &'static str,
    pub minutes: u32,
}

const INTERVAL_OPTIONS: &[IntervalOption] = &[
    IntervalOption {
        label: "1 minuto (prueba)",
        minutes: 1,
    },
    IntervalOption {
        label: "15 minutos",
        minutes: 15,
    },
    IntervalOption {
        label: "30 minutos",
        minutes: 30,
    },
    IntervalOption {
        label: "60 minutos",
        minutes: 60,
    },
    IntervalOption {
        label: "120 minutos",
        minutes: 120,
    },
];

/// Interval choices offered by the settings screen.
pub fn interval_options() -> &'static [IntervalOption] {
    INTERVAL_OPTIONS
}

impl<S: PreferenceStore> PreferenceService<S> {
    /// Stores the enabled flag, then schedules or cancels reminders.
    ///
    /// Returns the scheduler result; the flag is stored either way.
    pub fn set_notifications_enabled<N: NotificationCapability>(
        &self,
        scheduler: &NotificationScheduler<N>,
        enabled: bool,
    ) -> bool {
        self.dispatch(NotificationAction::SetEnabled(enabled));
        let interval_ms = self.state().notification.reminder_interval_ms;
        scheduler.schedule(enabled, interval_ms)
    }

    /// Stores the interval and reschedules only when reminders are enabled.
    pub fn set_reminder_interval_minutes<N: NotificationCapability>(
        &self,
        scheduler: &NotificationScheduler<N>,
        minutes: u32,
    ) -> bool {
        let interval_ms = i64::from(minutes) * 60 * 1000;
        self.dispatch(NotificationAction::SetReminderInterval(interval_ms));
        let notification = self.state().notification;
        if !notification.enabled {
            return true;
        }
        scheduler.schedule(true, notification.reminder_interval_ms)
    }

    /// Re-applies the stored reminder settings, e.g. at startup.
    pub fn apply_reminder_settings<N: NotificationCapability>(
        &self,
        scheduler: &NotificationScheduler<N>,
    ) -> bool {
        let notification = self.state().notification;
        scheduler.schedule(notification.enabled, notification.reminder_interval_ms)
    }
}
