//! Coarse "time ago" labels for notification rows.
//!
//! Buckets, first match wins:
//! - under one minute: `just now`
//! - under one hour: `<m> min ago`
//! - under one day: `<h> h ago`
//! - under one week: `<d> d ago`
//! - otherwise the calendar date from `format_date`
//!
//! Each unit is truncated toward zero. Timestamps in the future (clock skew
//! between client and server) fall into the `just now` bucket.

use super::display::format_date;
use chrono::{DateTime, Utc};

const JUST_NOW: &str = "just now";

/// Formats `timestamp` relative to `now`.
pub fn format_relative(now: DateTime<Utc>, timestamp: DateTime<Utc>) -> String {
    let delta = now.signed_duration_since(timestamp);

    let minutes = delta.num_minutes();
    if minutes < 1 {
        return JUST_NOW.to_string();
    }
    if minutes < 60 {
        return format!("{minutes} min ago");
    }

    let hours = delta.num_hours();
    if hours < 24 {
        return format!("{hours} h ago");
    }

    let days = delta.num_days();
    if days < 7 {
        return format!("{days} d ago");
    }

    format_date(timestamp)
}
