use super::*;
use crate::kernel::notification::{NotificationDraft, NotificationKind, DEDUP_WINDOW};
use crate::kernel::state::{PartialAppState, Theme};
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};

fn at(secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap() + ChronoDuration::seconds(secs)
}

fn note(id: &str, title: &str, message: &str, secs: i64) -> Notification {
    NotificationDraft::new(NotificationKind::Info, title, message)
        .into_notification(id.to_string(), at(secs))
}

fn apply(state: &AppState, action: Action) -> Transition {
    reduce(state, action, DEDUP_WINDOW)
}

#[test]
fn toggle_theme_parity() {
    let mut state = AppState::default();
    for n in 1..=7 {
        state = apply(&state, Action::ToggleTheme).state;
        let expected = if n % 2 == 0 { Theme::Light } else { Theme::Dark };
        assert_eq!(state.theme, expected, "after {n} toggles");
    }
}

#[test]
fn toggle_theme_reports_theme_effect() {
    let t = apply(&AppState::default(), Action::ToggleTheme);
    assert!(t.changed);
    assert_eq!(t.effects, vec![Effect::PersistState, Effect::ApplyTheme(Theme::Dark)]);
}

#[test]
fn toggle_sidebar_persists_only() {
    let t = apply(&AppState::default(), Action::ToggleSidebar);
    assert!(t.state.sidebar_collapsed);
    assert_eq!(t.effects, vec![Effect::PersistState]);
}

#[test]
fn input_state_is_not_mutated() {
    let state = AppState::default();
    let _ = apply(&state, Action::ToggleTheme);
    assert_eq!(state, AppState::default());
}

#[test]
fn set_loading_to_same_value_is_a_no_op() {
    let t = apply(&AppState::default(), Action::SetLoading(false));
    assert!(!t.changed);
    assert!(t.effects.is_empty());

    let t = apply(&AppState::default(), Action::SetLoading(true));
    assert!(t.changed);
    assert!(t.state.is_loading);
}

#[test]
fn add_prepends_newest_first() {
    let state = apply(&AppState::default(), Action::AddNotification(note("1", "A", "x", 0))).state;
    let t = apply(&state, Action::AddNotification(note("2", "B", "y", 1)));

    assert_eq!(t.state.notifications[0].id, "2");
    assert_eq!(t.state.notifications[1].id, "1");
    assert!(t.effects.contains(&Effect::NotificationsChanged));
}

#[test]
fn identical_notification_within_window_is_suppressed() {
    let state = apply(&AppState::default(), Action::AddNotification(note("1", "A", "B", 0))).state;
    let t = apply(&state, Action::AddNotification(note("2", "A", "B", 2)));

    assert!(!t.changed);
    assert!(t.effects.is_empty());
    assert_eq!(t.state.notifications.len(), 1);
}

#[test]
fn identical_notification_after_window_is_kept() {
    let state = apply(&AppState::default(), Action::AddNotification(note("1", "A", "B", 0))).state;
    let t = apply(&state, Action::AddNotification(note("2", "A", "B", 4)));

    assert!(t.changed);
    assert_eq!(t.state.notifications.len(), 2);
}

#[test]
fn custom_dedup_window_is_honoured() {
    let state = apply(&AppState::default(), Action::AddNotification(note("1", "A", "B", 0))).state;
    let t = reduce(
        &state,
        Action::AddNotification(note("2", "A", "B", 4)),
        std::time::Duration::from_secs(10),
    );
    assert!(!t.changed);
}

#[test]
fn duplicate_id_is_ignored() {
    let state = apply(&AppState::default(), Action::AddNotification(note("1", "A", "B", 0))).state;
    let t = apply(&state, Action::AddNotification(note("1", "Other", "Text", 60)));
    assert!(!t.changed);
    assert_eq!(t.state.notifications[0].title, "A");
}

#[test]
fn remove_unknown_id_is_a_no_op() {
    let state = apply(&AppState::default(), Action::AddNotification(note("1", "A", "B", 0))).state;
    let t = apply(&state, Action::RemoveNotification("nope".to_string()));
    assert!(!t.changed);
    assert_eq!(t.state, state);
}

#[test]
fn mark_read_touches_only_the_match() {
    let mut state = AppState::default();
    for (id, secs) in [("1", 0), ("2", 1), ("3", 2)] {
        state = apply(&state, Action::AddNotification(note(id, id, "m", secs))).state;
    }

    let t = apply(&state, Action::MarkNotificationRead("2".to_string()));
    let read: Vec<_> = t.state.notifications.iter().map(|n| (n.id.as_str(), n.read)).collect();
    assert_eq!(read, [("3", false), ("2", true), ("1", false)]);

    let again = apply(&t.state, Action::MarkNotificationRead("2".to_string()));
    assert!(!again.changed);
}

#[test]
fn load_state_keeps_unrelated_fields() {
    let state = apply(&AppState::default(), Action::ToggleSidebar).state;
    let t = apply(
        &state,
        Action::LoadState(PartialAppState::default().with_theme(Theme::Dark)),
    );

    assert_eq!(t.state.theme, Theme::Dark);
    assert!(t.state.sidebar_collapsed);
    assert!(t.effects.contains(&Effect::ApplyTheme(Theme::Dark)));
}

#[test]
fn load_state_matching_current_is_a_no_op() {
    let t = apply(
        &AppState::default(),
        Action::LoadState(AppState::default().into()),
    );
    assert!(!t.changed);
    assert!(t.effects.is_empty());
}
