use super::*;
use crate::kernel::notification::NotificationKind;
use chrono::TimeZone;

fn notification(id: &str, read: bool) -> Notification {
    Notification {
        id: id.to_string(),
        kind: NotificationKind::Info,
        title: format!("title {id}"),
        message: "message".to_string(),
        timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        read,
        action_url: None,
    }
}

fn user() -> User {
    User {
        id: "u1".to_string(),
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        role: UserRole::Admin,
        avatar: None,
        is_active: true,
        last_login: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        permissions: vec!["customers:read".to_string()],
    }
}

#[test]
fn defaults_match_first_run_state() {
    let state = AppState::default();
    assert_eq!(state.theme, Theme::Light);
    assert!(!state.sidebar_collapsed);
    assert!(state.current_user.is_none());
    assert!(state.notifications.is_empty());
    assert!(!state.is_loading);
}

#[test]
fn theme_toggles_back_and_forth() {
    assert_eq!(Theme::Light.toggled(), Theme::Dark);
    assert_eq!(Theme::Dark.toggled(), Theme::Light);
    assert!(Theme::Dark.is_dark());
    assert!(!Theme::Light.is_dark());
}

#[test]
fn merge_only_overrides_present_keys() {
    let mut state = AppState {
        sidebar_collapsed: true,
        ..AppState::default()
    };

    state.merge(PartialAppState::default().with_theme(Theme::Dark));

    assert_eq!(state.theme, Theme::Dark);
    assert!(state.sidebar_collapsed);
}

#[test]
fn merge_replaces_notification_list_wholesale() {
    let mut state = AppState {
        notifications: vec![notification("a", false), notification("b", false)],
        ..AppState::default()
    };

    state.merge(PartialAppState::default().with_notifications(vec![notification("c", true)]));

    let ids: Vec<_> = state.notifications.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, ["c"]);
}

#[test]
fn merge_drops_repeated_notification_ids() {
    let mut first = notification("a", false);
    first.title = "first".to_string();
    let mut repeat = notification("a", true);
    repeat.title = "repeat".to_string();

    let mut state = AppState::default();
    state.merge(PartialAppState::default().with_notifications(vec![
        first,
        notification("b", false),
        repeat,
    ]));

    let ids: Vec<_> = state.notifications.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
    assert_eq!(state.notifications[0].title, "first");
    assert!(!state.notifications[0].read);
}

#[test]
fn merge_sets_sidebar_without_touching_theme() {
    let mut state = AppState {
        theme: Theme::Dark,
        ..AppState::default()
    };
    state.merge(PartialAppState::default().with_sidebar_collapsed(true));

    assert!(state.sidebar_collapsed);
    assert_eq!(state.theme, Theme::Dark);
}

#[test]
fn merge_can_sign_out_explicitly() {
    let mut state = AppState {
        current_user: Some(user()),
        ..AppState::default()
    };

    state.merge(PartialAppState::default().with_loading(true));
    assert!(state.current_user.is_some());

    state.merge(PartialAppState::default().with_current_user(None));
    assert!(state.current_user.is_none());
    assert!(state.is_loading);
}

#[test]
fn unread_count_and_visible_window() {
    let state = AppState {
        notifications: vec![
            notification("a", false),
            notification("b", true),
            notification("c", false),
        ],
        ..AppState::default()
    };

    assert_eq!(state.unread_count(), 2);
    assert_eq!(state.visible_notifications(2).len(), 2);
    assert_eq!(state.visible_notifications(2)[0].id, "a");
    assert_eq!(state.visible_notifications(10).len(), 3);
    assert!(state.contains_notification("b"));
    assert!(!state.contains_notification("z"));
}

#[test]
fn serializes_with_camel_case_keys() {
    let state = AppState {
        theme: Theme::Dark,
        sidebar_collapsed: true,
        current_user: Some(user()),
        notifications: vec![notification("a", false)],
        is_loading: false,
    };

    let value = serde_json::to_value(&state).unwrap();
    assert_eq!(value["theme"], "dark");
    assert_eq!(value["sidebarCollapsed"], true);
    assert_eq!(value["isLoading"], false);
    assert_eq!(value["currentUser"]["role"], "admin");
    assert_eq!(value["currentUser"]["isActive"], true);
    assert_eq!(value["notifications"][0]["type"], "info");
    assert!(value["notifications"][0].get("actionUrl").is_none());
}

#[test]
fn partial_state_distinguishes_null_user_from_missing() {
    let missing: PartialAppState = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();
    assert_eq!(missing.theme, Some(Theme::Dark));
    assert_eq!(missing.current_user, None);

    let signed_out: PartialAppState = serde_json::from_str(r#"{"currentUser":null}"#).unwrap();
    assert_eq!(signed_out.current_user, Some(None));
}

#[test]
fn partial_state_ignores_unknown_fields() {
    let partial: PartialAppState =
        serde_json::from_str(r#"{"sidebarCollapsed":true,"filters":{"page":2},"version":7}"#)
            .unwrap();
    assert_eq!(partial.sidebar_collapsed, Some(true));
    assert!(partial.theme.is_none());
    assert!(!partial.is_empty());
    assert!(PartialAppState::default().is_empty());
}

#[test]
fn partial_state_from_full_state_round_trips_through_merge() {
    let full = AppState {
        theme: Theme::Dark,
        sidebar_collapsed: true,
        current_user: Some(user()),
        notifications: vec![notification("a", true)],
        is_loading: true,
    };

    let mut restored = AppState::default();
    restored.merge(full.clone().into());
    assert_eq!(restored, full);
}

#[test]
fn user_role_parses_case_insensitively() {
    assert_eq!(UserRole::from_name("Manager"), Some(UserRole::Manager));
    assert_eq!(UserRole::from_name("agent"), Some(UserRole::Agent));
    assert_eq!(UserRole::from_name("owner"), None);
}
