use bebeagua_core::state::{hydration, notification, profile, reduce, theme};
use bebeagua_core::{
    AppAction, AppState, HydrationAction, HydrationState, NotificationAction, ProfileAction,
    ThemeAction,
};

#[test]
fn add_glass_n_times_counts_n() {
    for n in [0_u32, 1, 5, 12, 40] {
        let mut state = HydrationState { glasses: 0, goal: 12 };
        for _ in 0..n {
            state = hydration::reduce(&state, HydrationAction::AddGlass);
        }
        assert_eq!(state, HydrationState { glasses: n, goal: 12 });
    }
}

#[test]
fn remove_glass_at_zero_stays_zero() {
    let state = HydrationState { glasses: 0, goal: 12 };
    assert_eq!(
        hydration::reduce(&state, HydrationAction::RemoveGlass),
        HydrationState { glasses: 0, goal: 12 }
    );
}

#[test]
fn every_action_is_handled_by_root_reducer() {
    let actions: Vec<AppAction> = vec![
        HydrationAction::AddGlass.into(),
        HydrationAction::RemoveGlass.into(),
        HydrationAction::Reset.into(),
        HydrationAction::SetGoal(9).into(),
        HydrationAction::SetGlasses(3).into(),
        ThemeAction::SetDarkMode(Some(true)).into(),
        ThemeAction::SetLoading(false).into(),
        NotificationAction::SetEnabled(false).into(),
        NotificationAction::SetReminderInterval(120_000).into(),
        ProfileAction::SetName("Ana".to_string()).into(),
        ProfileAction::SetAge(30).into(),
        ProfileAction::SetEmail("ana@example.com".to_string()).into(),
        ProfileAction::SetPhone("+34 600 000 000".to_string()).into(),
    ];

    let state = actions
        .into_iter()
        .fold(AppState::default(), |state, action| reduce(&state, action));

    assert_eq!(state.water, HydrationState { glasses: 3, goal: 9 });
    assert_eq!(state.theme.dark_mode, Some(true));
    assert!(!state.theme.is_loading);
    assert!(!state.notification.enabled);
    assert_eq!(state.notification.reminder_interval_ms, 120_000);
    assert_eq!(state.user.name, "Ana");
    assert_eq!(state.user.age, 30);
    assert_eq!(state.user.email, "ana@example.com");
    assert_eq!(state.user.phone, "+34 600 000 000");
}

#[test]
fn slice_reducers_leave_input_untouched() {
    let theme_before = theme::ThemeState::default();
    let _ = theme::reduce(&theme_before, ThemeAction::SetDarkMode(Some(false)));
    assert_eq!(theme_before, theme::ThemeState::default());

    let notification_before = notification::NotificationState::default();
    let _ = notification::reduce(&notification_before, NotificationAction::SetEnabled(false));
    assert!(notification_before.enabled);

    let profile_before = profile::UserProfile::default();
    let _ = profile::reduce(&profile_before, ProfileAction::SetAge(99));
    assert_eq!(profile_before.age, 0);
}
