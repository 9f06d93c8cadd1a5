use super::*;
use std::time::Duration;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = load_settings_from(&dir.path().join("nope.json"));
    assert_eq!(settings, Settings::default());
}

#[test]
fn partial_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "auto_dismiss_ms": 1500, "storage_key": "custom" }"#).unwrap();

    let settings = load_settings_from(&path);
    assert_eq!(settings.auto_dismiss(), Duration::from_millis(1500));
    assert_eq!(settings.storage_key, "custom");
    assert_eq!(settings.dedup_window(), Duration::from_secs(3));
    assert_eq!(settings.max_visible_notifications, 4);
}

#[test]
fn invalid_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert_eq!(load_settings_from(&path), Settings::default());
}

#[test]
fn ensure_writes_defaults_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    ensure_settings_file_at(&path).unwrap();
    assert_eq!(load_settings_from(&path), Settings::default());

    std::fs::write(&path, r#"{ "tick_interval_ms": 10 }"#).unwrap();
    ensure_settings_file_at(&path).unwrap();
    assert_eq!(load_settings_from(&path).tick_interval_ms, 10);
}

#[test]
fn zero_tick_interval_is_clamped() {
    let settings = Settings {
        tick_interval_ms: 0,
        ..Settings::default()
    };
    assert_eq!(settings.tick_interval(), Duration::from_millis(1));
}
