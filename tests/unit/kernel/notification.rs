use super::*;
use chrono::TimeZone;

fn at(secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap() + ChronoDuration::seconds(secs)
}

fn draft(title: &str, message: &str) -> NotificationDraft {
    NotificationDraft::new(NotificationKind::Success, title, message)
}

#[test]
fn generated_ids_are_nine_base36_chars() {
    for _ in 0..100 {
        let id = generate_id();
        assert_eq!(id.len(), 9);
        assert!(id.bytes().all(|b| ID_ALPHABET.contains(&b)), "bad id {id}");
    }
}

#[test]
fn generated_ids_do_not_repeat_in_practice() {
    let ids: std::collections::HashSet<_> = (0..1000).map(|_| generate_id()).collect();
    assert_eq!(ids.len(), 1000);
}

#[test]
fn unique_id_skips_taken_ids() {
    let calls = std::cell::Cell::new(0);
    let id = generate_unique_id(|_| {
        calls.set(calls.get() + 1);
        calls.get() == 1
    });
    assert_eq!(id.len(), 9);
    assert_eq!(calls.get(), 2);
}

#[test]
fn draft_becomes_unread_notification() {
    let n = draft("Saved", "Settings saved")
        .with_action_url("/settings")
        .into_notification("abc".to_string(), at(0));

    assert_eq!(n.id, "abc");
    assert_eq!(n.kind, NotificationKind::Success);
    assert_eq!(n.timestamp, at(0));
    assert!(!n.read);
    assert_eq!(n.action_url.as_deref(), Some("/settings"));
}

#[test]
fn repeats_within_window_only() {
    let first = draft("A", "B").into_notification("1".to_string(), at(0));
    let soon = draft("A", "B").into_notification("2".to_string(), at(2));
    let late = draft("A", "B").into_notification("3".to_string(), at(4));
    let other = draft("A", "C").into_notification("4".to_string(), at(1));

    assert!(soon.repeats(&first, DEDUP_WINDOW));
    assert!(!late.repeats(&first, DEDUP_WINDOW));
    assert!(!other.repeats(&first, DEDUP_WINDOW));
}

#[test]
fn repeat_window_is_exclusive_at_the_boundary() {
    let first = draft("A", "B").into_notification("1".to_string(), at(0));
    let edge = draft("A", "B").into_notification("2".to_string(), at(3));
    assert!(!edge.repeats(&first, DEDUP_WINDOW));
}

#[test]
fn kind_names_round_trip() {
    for kind in NotificationKind::ALL {
        assert_eq!(NotificationKind::from_name(kind.label()), Some(kind));
    }
    assert_eq!(NotificationKind::from_name("WARNING"), Some(NotificationKind::Warning));
    assert_eq!(NotificationKind::from_name("fatal"), None);
}

#[test]
fn wire_format_uses_type_and_rfc3339() {
    let n = draft("A", "B").into_notification("id1".to_string(), at(0));
    let json = serde_json::to_value(&n).unwrap();
    assert_eq!(json["type"], "success");
    assert_eq!(json["timestamp"], "2024-03-01T12:00:00Z");
    assert_eq!(json["read"], false);

    let parsed: Notification = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, n);
}

#[test]
fn relative_time_buckets() {
    let then = at(0);
    let cases = [
        (30, "Just now"),
        (60, "1m ago"),
        (59 * 60, "59m ago"),
        (2 * 3600, "2h ago"),
        (3 * 86_400, "3d ago"),
        (14 * 86_400, "2w ago"),
        (60 * 86_400, "2mo ago"),
        (400 * 86_400, "1y ago"),
    ];
    for (secs, expected) in cases {
        assert_eq!(format_relative(then, at(secs)), expected, "after {secs}s");
    }
}
