//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Open the preference database per call and keep state in sync with it.
//! - Hand OS-facing work back to the host: navigation targets and ordered
//!   notification steps produced by the core scheduler.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Storage failures surface as `ok=false` envelopes, never as panics.

use bebeagua_core::db::open_db;
use bebeagua_core::linking::{self, DeepLinkHandler, LinkOutcome, Navigator};
use bebeagua_core::notification::{
    ChannelConfig, Importance, NotificationCapability, NotificationContent, NotificationResult,
    NotificationScheduler, PermissionRequest, PermissionStatus, CHANNEL_ID,
};
use bebeagua_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ActionSink, AppAction, AppState, FirstLaunch, HydrationAction, Platform, PreferenceService,
    ProfileAction, SqlitePreferenceStore,
};
use log::warn;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::OnceLock;

const PREFS_DB_FILE_NAME: &str = "bebeagua_prefs.sqlite3";
const DB_PATH_ENV: &str = "BEBEAGUA_DB_PATH";
const PLATFORM_ENV: &str = "BEBEAGUA_PLATFORM";
static PREFS_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static PLATFORM: OnceLock<Platform> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Flattened view of persisted preferences for the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSnapshot {
    pub glasses: u32,
    pub goal: u32,
    /// Rounded progress in `0..=100`.
    pub progress_percent: u8,
    /// `None` follows the system color scheme.
    pub dark_mode: Option<bool>,
    pub theme_loading: bool,
    pub notifications_enabled: bool,
    pub reminder_interval_minutes: f64,
    pub name: String,
    pub age: u32,
    pub email: String,
    pub phone: String,
}

impl AppSnapshot {
    fn from_state(state: &AppState) -> Self {
        Self {
            glasses: state.water.glasses,
            goal: state.water.goal,
            progress_percent: state.water.progress_percent(),
            dark_mode: state.theme.dark_mode,
            theme_loading: state.theme.is_loading,
            notifications_enabled: state.notification.enabled,
            reminder_interval_minutes: state.notification.reminder_interval_minutes(),
            name: state.user.name.clone(),
            age: state.user.age,
            email: state.user.email.clone(),
            phone: state.user.phone.clone(),
        }
    }
}

/// Response envelope for preference reads and writes.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceResponse {
    pub ok: bool,
    /// Present when the database could be opened.
    pub snapshot: Option<AppSnapshot>,
    pub message: String,
}

impl PreferenceResponse {
    fn from_result(operation: &str, result: Result<(bool, AppSnapshot), String>) -> Self {
        match result {
            Ok((true, snapshot)) => Self {
                ok: true,
                snapshot: Some(snapshot),
                message: String::new(),
            },
            Ok((false, snapshot)) => Self {
                ok: false,
                snapshot: Some(snapshot),
                message: format!("{operation} failed: preference write failed"),
            },
            Err(err) => Self {
                ok: false,
                snapshot: None,
                message: format!("{operation} failed: {err}"),
            },
        }
    }
}

/// Startup result: hydrated preferences plus onboarding flag.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapResponse {
    pub snapshot: Option<AppSnapshot>,
    pub is_first_launch: bool,
    pub message: String,
}

/// Reads persisted state, resolves dark mode and the first-launch marker.
///
/// # FFI contract
/// - Storage failure yields `is_first_launch=false` and no snapshot.
#[flutter_rust_bridge::frb(sync)]
pub fn app_bootstrap() -> BootstrapResponse {
    let result = with_preferences(|service| {
        service.load_dark_mode();
        let is_first_launch = FirstLaunch::new(service.store()).check();
        (AppSnapshot::from_state(&service.state()), is_first_launch)
    });

    match result {
        Ok((snapshot, is_first_launch)) => BootstrapResponse {
            snapshot: Some(snapshot),
            is_first_launch,
            message: String::new(),
        },
        Err(err) => {
            warn!("event=app_bootstrap module=ffi status=error error={err}");
            BootstrapResponse {
                snapshot: None,
                is_first_launch: false,
                message: format!("app_bootstrap failed: {err}"),
            }
        }
    }
}

/// Current persisted preferences.
#[flutter_rust_bridge::frb(sync)]
pub fn app_snapshot() -> PreferenceResponse {
    PreferenceResponse::from_result(
        "app_snapshot",
        with_preferences(|service| (true, AppSnapshot::from_state(&service.state()))),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn water_add_glass() -> PreferenceResponse {
    apply_action("water_add_glass", HydrationAction::AddGlass.into())
}

#[flutter_rust_bridge::frb(sync)]
pub fn water_remove_glass() -> PreferenceResponse {
    apply_action("water_remove_glass", HydrationAction::RemoveGlass.into())
}

#[flutter_rust_bridge::frb(sync)]
pub fn water_reset() -> PreferenceResponse {
    apply_action("water_reset", HydrationAction::Reset.into())
}

#[flutter_rust_bridge::frb(sync)]
pub fn water_set_goal(goal: u32) -> PreferenceResponse {
    apply_action("water_set_goal", HydrationAction::SetGoal(goal).into())
}

#[flutter_rust_bridge::frb(sync)]
pub fn water_set_glasses(glasses: u32) -> PreferenceResponse {
    apply_action("water_set_glasses", HydrationAction::SetGlasses(glasses).into())
}

#[flutter_rust_bridge::frb(sync)]
pub fn profile_set_name(name: String) -> PreferenceResponse {
    apply_action("profile_set_name", ProfileAction::SetName(name).into())
}

#[flutter_rust_bridge::frb(sync)]
pub fn profile_set_age(age: u32) -> PreferenceResponse {
    apply_action("profile_set_age", ProfileAction::SetAge(age).into())
}

#[flutter_rust_bridge::frb(sync)]
pub fn profile_set_email(email: String) -> PreferenceResponse {
    apply_action("profile_set_email", ProfileAction::SetEmail(email).into())
}

#[flutter_rust_bridge::frb(sync)]
pub fn profile_set_phone(phone: String) -> PreferenceResponse {
    apply_action("profile_set_phone", ProfileAction::SetPhone(phone).into())
}

/// Stores the dark-mode preference (`None` = follow system).
#[flutter_rust_bridge::frb(sync)]
pub fn theme_set_dark_mode(value: Option<bool>) -> PreferenceResponse {
    PreferenceResponse::from_result(
        "theme_set_dark_mode",
        with_preferences(|service| {
            let ok = service.set_dark_mode(value);
            (ok, AppSnapshot::from_state(&service.state()))
        }),
    )
}

/// Permission state the host read from the OS right before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPermission {
    Granted,
    Denied,
    Undetermined,
}

/// Reminder payload for one OS scheduling call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderContent {
    pub title: String,
    pub body: String,
    pub sound: String,
    /// Android channel id; `None` elsewhere.
    pub channel_id: Option<String>,
}

impl From<&NotificationContent> for ReminderContent {
    fn from(content: &NotificationContent) -> Self {
        Self {
            title: content.title.clone(),
            body: content.body.clone(),
            sound: content.sound.clone(),
            channel_id: content.channel_id.clone(),
        }
    }
}

/// Android channel profile the host registers before scheduling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderChannel {
    pub id: String,
    pub name: String,
    pub description: String,
    pub high_importance: bool,
    pub vibration_pattern: Vec<u64>,
}

impl ReminderChannel {
    fn from_config(id: &str, config: &ChannelConfig) -> Self {
        Self {
            id: id.to_string(),
            name: config.name.clone(),
            description: config.description.clone(),
            high_importance: config.importance == Importance::High,
            vibration_pattern: config.vibration_pattern.clone(),
        }
    }
}

/// One OS notification call, to be run by the host in order.
///
/// With `HostPermission::Undetermined` the core assumes the request is
/// accepted; the host stops at `RequestPermission` when the user declines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderStep {
    RequestPermission {
        alert: bool,
        badge: bool,
        sound: bool,
    },
    ConfigureChannel {
        channel: ReminderChannel,
    },
    CancelAll,
    ScheduleRecurring {
        content: ReminderContent,
        interval_seconds: u64,
    },
    ScheduleOnce {
        content: ReminderContent,
        delay_seconds: u64,
    },
}

/// Response envelope for reminder use-cases.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderResponse {
    /// Scheduler outcome; `false` when permission was denied.
    pub ok: bool,
    pub steps: Vec<ReminderStep>,
    pub snapshot: Option<AppSnapshot>,
    pub message: String,
}

/// Stores the reminder flag, then schedules or cancels reminders.
#[flutter_rust_bridge::frb(sync)]
pub fn notification_set_enabled(enabled: bool, permission: HostPermission) -> ReminderResponse {
    run_reminders("notification_set_enabled", permission, |service, scheduler| {
        service.set_notifications_enabled(scheduler, enabled)
    })
}

/// Stores the reminder interval given in minutes; reschedules when enabled.
#[flutter_rust_bridge::frb(sync)]
pub fn notification_set_interval_minutes(
    minutes: u32,
    permission: HostPermission,
) -> ReminderResponse {
    run_reminders(
        "notification_set_interval_minutes",
        permission,
        |service, scheduler| service.set_reminder_interval_minutes(scheduler, minutes),
    )
}

/// Re-applies stored reminder settings, e.g. at app start.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_apply(permission: HostPermission) -> ReminderResponse {
    run_reminders("reminder_apply", permission, |service, scheduler| {
        service.apply_reminder_settings(scheduler)
    })
}

/// Posts one reminder shortly, leaving the recurring schedule alone.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_send_test(permission: HostPermission) -> ReminderResponse {
    run_reminders("reminder_send_test", permission, |_, scheduler| {
        scheduler.send_test_notification()
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn reminder_channel() -> ReminderChannel {
    ReminderChannel::from_config(CHANNEL_ID, &ChannelConfig::water_reminder())
}

/// Notification capability that records OS calls for the host.
struct HostNotifier {
    permission: HostPermission,
    steps: RefCell<Vec<ReminderStep>>,
}

impl HostNotifier {
    fn new(permission: HostPermission) -> Self {
        Self {
            permission,
            steps: RefCell::new(Vec::new()),
        }
    }

    fn record(&self, step: ReminderStep) -> usize {
        let mut steps = self.steps.borrow_mut();
        steps.push(step);
        steps.len()
    }

    fn take_steps(&self) -> Vec<ReminderStep> {
        self.steps.take()
    }
}

impl NotificationCapability for HostNotifier {
    fn permission_status(&self) -> NotificationResult<PermissionStatus> {
        Ok(match self.permission {
            HostPermission::Granted => PermissionStatus::Granted,
            HostPermission::Denied => PermissionStatus::Denied,
            HostPermission::Undetermined => PermissionStatus::Undetermined,
        })
    }

    fn request_permission(
        &self,
        request: &PermissionRequest,
    ) -> NotificationResult<PermissionStatus> {
        self.record(ReminderStep::RequestPermission {
            alert: request.allow_alert,
            badge: request.allow_badge,
            sound: request.allow_sound,
        });
        Ok(match self.permission {
            HostPermission::Denied => PermissionStatus::Denied,
            HostPermission::Granted | HostPermission::Undetermined => PermissionStatus::Granted,
        })
    }

    fn configure_channel(
        &self,
        channel_id: &str,
        config: &ChannelConfig,
    ) -> NotificationResult<()> {
        self.record(ReminderStep::ConfigureChannel {
            channel: ReminderChannel::from_config(channel_id, config),
        });
        Ok(())
    }

    fn schedule_recurring(
        &self,
        content: &NotificationContent,
        interval_seconds: u64,
    ) -> NotificationResult<String> {
        let index = self.record(ReminderStep::ScheduleRecurring {
            content: content.into(),
            interval_seconds,
        });
        Ok(format!("step-{index}"))
    }

    fn schedule_once(
        &self,
        content: &NotificationContent,
        delay_seconds: u64,
    ) -> NotificationResult<String> {
        let index = self.record(ReminderStep::ScheduleOnce {
            content: content.into(),
            delay_seconds,
        });
        Ok(format!("step-{index}"))
    }

    fn cancel_all(&self) -> NotificationResult<()> {
        self.record(ReminderStep::CancelAll);
        Ok(())
    }
}

fn run_reminders(
    operation: &str,
    permission: HostPermission,
    f: impl FnOnce(
        &PreferenceService<SqlitePreferenceStore<'_>>,
        &NotificationScheduler<HostNotifier>,
    ) -> bool,
) -> ReminderResponse {
    let result = with_preferences(|service| {
        let scheduler =
            NotificationScheduler::new(HostNotifier::new(permission), resolve_platform());
        let ok = f(service, &scheduler);
        (
            ok,
            scheduler.notifier().take_steps(),
            AppSnapshot::from_state(&service.state()),
        )
    });

    match result {
        Ok((ok, steps, snapshot)) => ReminderResponse {
            ok,
            steps,
            snapshot: Some(snapshot),
            message: if ok {
                String::new()
            } else {
                format!("{operation}: reminders not scheduled")
            },
        },
        Err(err) => {
            warn!("event={operation} module=ffi status=error error={err}");
            ReminderResponse {
                ok: false,
                steps: Vec::new(),
                snapshot: None,
                message: format!("{operation} failed: {err}"),
            }
        }
    }
}

/// Resolves the first-launch marker. Storage errors report `false`.
#[flutter_rust_bridge::frb(sync)]
pub fn first_launch_check() -> bool {
    with_preferences(|service| FirstLaunch::new(service.store()).check()).unwrap_or_else(|err| {
        warn!("event=first_launch_check module=ffi status=error error={err}");
        false
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn first_launch_mark_seen() {
    if let Err(err) = with_preferences(|service| FirstLaunch::new(service.store()).mark_seen()) {
        warn!("event=first_launch_mark_seen module=ffi status=error error={err}");
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn first_launch_reset() {
    if let Err(err) =
        with_preferences(|service| FirstLaunch::new(service.store()).reset_tutorial())
    {
        warn!("event=first_launch_reset module=ffi status=error error={err}");
    }
}

/// One query parameter of a deep link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLinkParam {
    pub key: String,
    pub value: String,
}

/// Decoded deep link for UI routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLinkInfo {
    pub route: String,
    pub params: Vec<DeepLinkParam>,
}

/// Decodes a deep link without side effects. `None` for unusable URLs.
#[flutter_rust_bridge::frb(sync)]
pub fn deep_link_decode(url: String) -> Option<DeepLinkInfo> {
    linking::decode(&url).map(|link| DeepLinkInfo {
        route: link.route,
        params: link
            .params
            .into_iter()
            .map(|(key, value)| DeepLinkParam { key, value })
            .collect(),
    })
}

/// Builds a `bebeagua://` URL for an internal route.
#[flutter_rust_bridge::frb(sync)]
pub fn deep_link_encode(route: String, params: Vec<DeepLinkParam>) -> String {
    let params = params
        .into_iter()
        .map(|param| (param.key, param.value))
        .collect::<BTreeMap<_, _>>();
    linking::encode(&route, Some(&params))
}

/// Result of handling an incoming deep link.
#[derive(Debug, Clone, PartialEq)]
pub struct DeepLinkHandleResponse {
    /// `false` when the URL was ignored.
    pub handled: bool,
    /// Route the host should push, if any.
    pub navigate_to: Option<String>,
    pub snapshot: Option<AppSnapshot>,
    pub message: String,
}

/// Handles one incoming URL: applies in-place actions, persists them and
/// returns the navigation target for the host router.
#[flutter_rust_bridge::frb(sync)]
pub fn deep_link_handle(url: String) -> DeepLinkHandleResponse {
    let result = with_preferences(|service| {
        let navigator = Rc::new(PendingNavigation::default());
        let handler = DeepLinkHandler::new(
            Rc::clone(service.app()) as Rc<dyn ActionSink>,
            Rc::clone(&navigator) as Rc<dyn Navigator>,
        );
        let outcome = handler.handle_url(&url);
        let persisted = match outcome {
            LinkOutcome::AddedGlass { .. } => service.persist().is_ok(),
            LinkOutcome::Navigated { .. } | LinkOutcome::Ignored => true,
        };
        (
            outcome,
            navigator.take(),
            persisted,
            AppSnapshot::from_state(&service.state()),
        )
    });

    match result {
        Ok((outcome, navigate_to, persisted, snapshot)) => DeepLinkHandleResponse {
            handled: outcome != LinkOutcome::Ignored,
            navigate_to,
            snapshot: Some(snapshot),
            message: if persisted {
                String::new()
            } else {
                "deep_link_handle: preference write failed".to_string()
            },
        },
        Err(err) => DeepLinkHandleResponse {
            handled: false,
            navigate_to: None,
            snapshot: None,
            message: format!("deep_link_handle failed: {err}"),
        },
    }
}

/// Navigator that remembers the last requested route for the host.
#[derive(Default)]
struct PendingNavigation {
    route: RefCell<Option<String>>,
}

impl PendingNavigation {
    fn take(&self) -> Option<String> {
        self.route.borrow_mut().take()
    }
}

impl Navigator for PendingNavigation {
    fn navigate(&self, route: &str) {
        *self.route.borrow_mut() = Some(route.to_string());
    }
}

fn apply_action(operation: &str, action: AppAction) -> PreferenceResponse {
    PreferenceResponse::from_result(
        operation,
        with_preferences(|service| {
            let ok = service.dispatch(action);
            (ok, AppSnapshot::from_state(&service.state()))
        }),
    )
}

fn with_preferences<T>(
    f: impl FnOnce(&PreferenceService<SqlitePreferenceStore<'_>>) -> T,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("preference DB open failed: {err}"))?;
    let service = PreferenceService::load(SqlitePreferenceStore::new(&conn));
    Ok(f(&service))
}

fn resolve_db_path() -> PathBuf {
    PREFS_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(PREFS_DB_FILE_NAME)
        })
        .clone()
}

fn resolve_platform() -> Platform {
    *PLATFORM.get_or_init(|| {
        std::env::var(PLATFORM_ENV)
            .ok()
            .and_then(|raw| Platform::parse(&raw))
            .unwrap_or_else(Platform::current)
    })
}
