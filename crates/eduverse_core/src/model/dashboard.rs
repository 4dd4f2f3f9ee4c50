//! Dashboard statistics returned by `GET /api/dashboard/stats`.

use super::wire::null_as_default;
use serde::{Deserialize, Serialize};

/// Per-user dashboard counters.
///
/// Only `unread_notifications` is common to every role; the other counters
/// are present for students or teachers only. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default, deserialize_with = "null_as_default")]
    pub unread_notifications: u64,
    /// Student and teacher dashboards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_grades: Option<u64>,
    /// Student dashboards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overdue_payments: Option<u64>,
    /// Teacher dashboards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grades_given: Option<u64>,
}
