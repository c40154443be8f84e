//! Reminder scheduling over the OS notification capability.
//!
//! # Invariants
//! - Every public operation catches capability errors, logs them and
//!   degrades to `false`.
//! - Channel setup lives in one idempotent step shared by every path that
//!   needs permission.
//! - Scheduling a recurring reminder always cancels previous ones first.

use super::{
    ChannelConfig, NotificationCapability, NotificationContent, NotificationResult,
    PermissionRequest, PermissionStatus, Platform, CHANNEL_ID, DEFAULT_INTERVAL_SECONDS,
    TEST_NOTIFICATION_DELAY_SECONDS,
};
use log::{error, info, warn};
use std::cell::Cell;

/// Converts a stored millisecond interval into OS trigger seconds.
///
/// Non-positive intervals fall back to [`DEFAULT_INTERVAL_SECONDS`]. The
/// result is floored to whole seconds and raised to the platform minimum.
pub fn reminder_interval_seconds(interval_ms: i64, platform: Platform) -> u64 {
    let seconds = if interval_ms <= 0 {
        DEFAULT_INTERVAL_SECONDS
    } else {
        (interval_ms / 1000) as u64
    };
    seconds.max(platform.min_interval_seconds())
}

/// Plans water reminders for one platform.
pub struct NotificationScheduler<N: NotificationCapability> {
    notifier: N,
    platform: Platform,
    channel_ready: Cell<bool>,
}

impl<N: NotificationCapability> NotificationScheduler<N> {
    pub fn new(notifier: N, platform: Platform) -> Self {
        Self {
            notifier,
            platform,
            channel_ready: Cell::new(false),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Checks permission, requests it when missing, then makes sure the
    /// reminder channel exists. Returns whether reminders can be posted.
    pub fn ensure_permission(&self) -> bool {
        match self.try_ensure_permission() {
            Ok(granted) => granted,
            Err(err) => {
                error!(
                    "event=notification_permission module=notification status=error error={err}"
                );
                false
            }
        }
    }

    /// Schedules (or cancels) the recurring reminder.
    ///
    /// - `enabled == false`: cancels every scheduled reminder.
    /// - `enabled == true`: permission, cancel previous, schedule one.
    pub fn schedule(&self, enabled: bool, interval_ms: i64) -> bool {
        if !enabled {
            return self.cancel_all();
        }

        if !self.ensure_permission() {
            warn!("event=notification_schedule module=notification status=skipped reason=permission_denied");
            return false;
        }

        let seconds = reminder_interval_seconds(interval_ms, self.platform);
        match self.try_schedule_recurring(seconds) {
            Ok(id) => {
                info!(
                    "event=notification_schedule module=notification status=ok interval_s={} platform={} id={}",
                    seconds,
                    self.platform.as_str(),
                    id
                );
                true
            }
            Err(err) => {
                error!("event=notification_schedule module=notification status=error error={err}");
                false
            }
        }
    }

    /// Posts one reminder after a short delay without touching the
    /// recurring schedule.
    pub fn send_test_notification(&self) -> bool {
        if !self.ensure_permission() {
            warn!("event=notification_test module=notification status=skipped reason=permission_denied");
            return false;
        }

        let content = NotificationContent::water_reminder(self.platform);
        match self
            .notifier
            .schedule_once(&content, TEST_NOTIFICATION_DELAY_SECONDS)
        {
            Ok(id) => {
                info!("event=notification_test module=notification status=ok id={id}");
                true
            }
            Err(err) => {
                error!("event=notification_test module=notification status=error error={err}");
                false
            }
        }
    }

    /// Cancels every scheduled reminder.
    pub fn cancel_all(&self) -> bool {
        match self.notifier.cancel_all() {
            Ok(()) => {
                info!("event=notification_cancel module=notification status=ok");
                true
            }
            Err(err) => {
                error!("event=notification_cancel module=notification status=error error={err}");
                false
            }
        }
    }

    fn try_ensure_permission(&self) -> NotificationResult<bool> {
        let mut status = self.notifier.permission_status()?;
        if status != PermissionStatus::Granted {
            status = self
                .notifier
                .request_permission(&PermissionRequest::default())?;
        }

        if status != PermissionStatus::Granted {
            warn!("event=notification_permission module=notification status=denied");
            return Ok(false);
        }

        self.ensure_channel()?;
        Ok(true)
    }

    fn ensure_channel(&self) -> NotificationResult<()> {
        if !self.platform.requires_channel() || self.channel_ready.get() {
            return Ok(());
        }
        self.notifier
            .configure_channel(CHANNEL_ID, &ChannelConfig::water_reminder())?;
        self.channel_ready.set(true);
        info!("event=notification_channel module=notification status=ok channel={CHANNEL_ID}");
        Ok(())
    }

    fn try_schedule_recurring(&self, seconds: u64) -> NotificationResult<String> {
        self.notifier.cancel_all()?;
        let content = NotificationContent::water_reminder(self.platform);
        self.notifier.schedule_recurring(&content, seconds)
    }
}
