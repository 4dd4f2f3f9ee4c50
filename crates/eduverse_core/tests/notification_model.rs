use chrono::{TimeZone, Utc};
use eduverse_core::{Notification, NotificationId, NotificationKind, NotificationPriority};

#[test]
fn decodes_minimal_record_with_defaults() {
    let value = serde_json::json!({
        "id": 1,
        "created_at": "2024-01-10T12:00:00"
    });

    let notification: Notification = serde_json::from_value(value).unwrap();

    assert_eq!(notification.id, NotificationId(1));
    assert_eq!(notification.kind, NotificationKind::Other(String::new()));
    assert_eq!(notification.kind.icon_class(), "fas fa-bell");
    assert_eq!(notification.title, "");
    assert!(!notification.is_read);
    assert_eq!(notification.priority(), NotificationPriority::Info);
    assert_eq!(
        notification.created_at,
        Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()
    );
}

#[test]
fn unknown_or_null_type_never_fails() {
    let unknown: Notification = serde_json::from_value(serde_json::json!({
        "id": 2, "type": "homework", "created_at": "2024-01-10T12:00:00Z"
    }))
    .unwrap();
    assert_eq!(unknown.kind, NotificationKind::Other("homework".to_string()));
    assert_eq!(unknown.kind.icon_class(), "fas fa-bell");

    let null_kind: Notification = serde_json::from_value(serde_json::json!({
        "id": 3, "type": null, "title": null, "created_at": "2024-01-10T12:00:00Z"
    }))
    .unwrap();
    assert_eq!(null_kind.kind, NotificationKind::Other(String::new()));
    assert_eq!(null_kind.kind.icon_class(), "fas fa-bell");
    assert_eq!(null_kind.title, "");
}

#[test]
fn type_tags_match_case_sensitively() {
    let shouted: Notification = serde_json::from_value(serde_json::json!({
        "id": 5, "type": "INFO", "created_at": "2024-01-10T12:00:00Z"
    }))
    .unwrap();
    assert_eq!(shouted.kind, NotificationKind::Other("INFO".to_string()));
    assert_eq!(shouted.kind.icon_class(), "fas fa-bell");
}

#[test]
fn icon_classes_cover_every_known_kind() {
    let cases = [
        ("info", "fas fa-info-circle"),
        ("warning", "fas fa-exclamation-triangle"),
        ("error", "fas fa-times-circle"),
        ("success", "fas fa-check-circle"),
    ];
    for (tag, icon) in cases {
        assert_eq!(NotificationKind::from_wire(tag).icon_class(), icon, "tag {tag}");
    }
}

#[test]
fn serializes_with_wire_field_names() {
    let mut notification = Notification::new(
        NotificationId(9),
        NotificationKind::Other("homework".to_string()),
        "Essay",
        "Due Friday",
        Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap(),
    );
    notification.requires_action = true;

    let json = serde_json::to_value(&notification).unwrap();
    assert_eq!(json["id"], 9);
    assert_eq!(json["type"], "homework");
    assert_eq!(json["requires_action"], true);
    assert_eq!(json["created_at"], "2024-01-10T12:00:00+00:00");
    assert_eq!(notification.priority().css_class(), "notification-action");
}

#[test]
fn invalid_timestamp_is_a_decode_error() {
    let err = serde_json::from_value::<Notification>(serde_json::json!({
        "id": 4, "created_at": "last tuesday"
    }))
    .unwrap_err();
    assert!(err.to_string().contains("invalid timestamp"), "unexpected error: {err}");
}
