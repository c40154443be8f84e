//! Local reminder notifications.
//!
//! # Responsibility
//! - Define the OS notification capability consumed by core.
//! - Hold the fixed reminder content and Android channel profile.
//! - Convert stored millisecond intervals into OS trigger seconds.
//!
//! # Invariants
//! - At most one recurring reminder is scheduled at a time.
//! - Capability failures never propagate out of the scheduler.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod scheduler;

pub use scheduler::{reminder_interval_seconds, NotificationScheduler};

pub const REMINDER_TITLE: &str = "💧 ¡No te olvides de beber agua!";
pub const REMINDER_BODY: &str = "aunque sea una gota, es importante para tu salud";
pub const REMINDER_SOUND: &str = "default";
/// Android notification channel id.
pub const CHANNEL_ID: &str = "water-reminder-channel";
/// Used when the stored interval converts to zero or fewer seconds.
pub const DEFAULT_INTERVAL_SECONDS: u64 = 3600;
/// Delay of the one-shot test notification.
pub const TEST_NOTIFICATION_DELAY_SECONDS: u64 = 1;
pub const CHANNEL_VIBRATION_PATTERN: [u64; 4] = [0, 250, 250, 250];

/// Host platform family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Ios,
    Android,
    Other,
}

impl Platform {
    /// Minimum repeat interval accepted by the OS scheduler.
    pub fn min_interval_seconds(self) -> u64 {
        match self {
            Self::Ios => 60,
            Self::Android | Self::Other => 1,
        }
    }

    /// Whether notifications must be bound to a configured channel.
    pub fn requires_channel(self) -> bool {
        matches!(self, Self::Android)
    }

    /// Platform of the current compile target.
    pub fn current() -> Self {
        if cfg!(target_os = "ios") {
            Self::Ios
        } else if cfg!(target_os = "android") {
            Self::Android
        } else {
            Self::Other
        }
    }

    /// Parses `ios|android|other` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ios" => Some(Self::Ios),
            "android" => Some(Self::Android),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

/// Options sent with a permission request (honored on iOS only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionRequest {
    pub allow_alert: bool,
    pub allow_badge: bool,
    pub allow_sound: bool,
}

impl Default for PermissionRequest {
    fn default() -> Self {
        Self {
            allow_alert: true,
            allow_badge: true,
            allow_sound: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Importance {
    Default,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
    pub name: String,
    pub description: String,
    pub importance: Importance,
    pub vibration_pattern: Vec<u64>,
    pub enable_vibrate: bool,
}

impl ChannelConfig {
    /// Fixed profile of the water reminder channel.
    pub fn water_reminder() -> Self {
        Self {
            name: REMINDER_TITLE.to_string(),
            description: REMINDER_BODY.to_string(),
            importance: Importance::High,
            vibration_pattern: CHANNEL_VIBRATION_PATTERN.to_vec(),
            enable_vibrate: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    pub sound: String,
    /// Set only on platforms that require a channel.
    pub channel_id: Option<String>,
}

impl NotificationContent {
    pub fn water_reminder(platform: Platform) -> Self {
        Self {
            title: REMINDER_TITLE.to_string(),
            body: REMINDER_BODY.to_string(),
            sound: REMINDER_SOUND.to_string(),
            channel_id: platform
                .requires_channel()
                .then(|| CHANNEL_ID.to_string()),
        }
    }
}

/// Error reported by the OS notification capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    PermissionQuery(String),
    ChannelSetup(String),
    Schedule(String),
    Cancel(String),
}

impl Display for NotificationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionQuery(message) => write!(f, "permission query failed: {message}"),
            Self::ChannelSetup(message) => write!(f, "channel setup failed: {message}"),
            Self::Schedule(message) => write!(f, "scheduling failed: {message}"),
            Self::Cancel(message) => write!(f, "cancel failed: {message}"),
        }
    }
}

impl Error for NotificationError {}

pub type NotificationResult<T> = Result<T, NotificationError>;

/// OS local-notification capability.
pub trait NotificationCapability {
    fn permission_status(&self) -> NotificationResult<PermissionStatus>;
    fn request_permission(
        &self,
        request: &PermissionRequest,
    ) -> NotificationResult<PermissionStatus>;
    fn configure_channel(&self, channel_id: &str, config: &ChannelConfig)
        -> NotificationResult<()>;
    /// Schedules a reminder repeating every `interval_seconds`. Returns its id.
    fn schedule_recurring(
        &self,
        content: &NotificationContent,
        interval_seconds: u64,
    ) -> NotificationResult<String>;
    /// Schedules a reminder firing once after `delay_seconds`. Returns its id.
    fn schedule_once(
        &self,
        content: &NotificationContent,
        delay_seconds: u64,
    ) -> NotificationResult<String>;
    fn cancel_all(&self) -> NotificationResult<()>;
}
