use chrono::{DateTime, Utc};
use eduverse_core::{format_relative, Clock, FixedClock};

fn at(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
}

#[test]
fn thirty_seconds_ago_is_just_now() {
    let now = at("2024-01-10T12:00:00Z");
    assert_eq!(format_relative(now, at("2024-01-10T11:59:30Z")), "just now");
}

#[test]
fn two_hours_ago_uses_hour_bucket_not_minutes() {
    let now = at("2024-01-10T12:00:00Z");
    assert_eq!(format_relative(now, at("2024-01-10T10:00:00Z")), "2 h ago");
}

#[test]
fn nine_days_ago_falls_back_to_calendar_date() {
    let now = at("2024-01-10T12:00:00Z");
    assert_eq!(format_relative(now, at("2024-01-01T12:00:00Z")), "1 January 2024");
}

#[test]
fn output_depends_only_on_explicit_inputs() {
    let clock = FixedClock(at("2024-03-01T00:00:00Z"));
    let ts = at("2024-02-27T00:00:00Z");
    let first = format_relative(clock.now(), ts);
    let second = format_relative(clock.now(), ts);
    assert_eq!(first, "3 d ago");
    assert_eq!(first, second);
}
