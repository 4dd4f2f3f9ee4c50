//! Notification domain model.
//!
//! # Responsibility
//! - Define the record returned by `GET /api/notifications`.
//! - Provide the read-state transition and presentation class mappings.
//!
//! # Invariants
//! - `id` is stable and never reused for another notification.
//! - `is_read` only ever transitions `false -> true` through this crate.
//! - Unknown, null or missing `type` tags decode to `NotificationKind::Other`
//!   and render with the default bell icon.

use super::wire::{null_as_default, timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Server-assigned notification identifier.
///
/// Opaque to this crate: it is only compared and echoed back to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub i64);

impl Display for NotificationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for NotificationId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Category tag carried in the wire `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NotificationKind {
    Info,
    Warning,
    Error,
    Success,
    /// Any tag the client does not know. The raw value is kept for logging;
    /// it is empty when the server sent no tag.
    Other(String),
}

impl Default for NotificationKind {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl NotificationKind {
    /// Parses a wire tag. Matching is exact and never fails.
    pub fn from_wire(value: &str) -> Self {
        match value {
            "info" => Self::Info,
            "warning" => Self::Warning,
            "error" => Self::Error,
            "success" => Self::Success,
            _ => Self::Other(value.to_string()),
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Success => "success",
            Self::Other(raw) => raw.as_str(),
        }
    }

    /// Font Awesome icon class used by list rows.
    pub fn icon_class(&self) -> &'static str {
        match self {
            Self::Info => "fas fa-info-circle",
            Self::Warning => "fas fa-exclamation-triangle",
            Self::Error => "fas fa-times-circle",
            Self::Success => "fas fa-check-circle",
            Self::Other(_) => "fas fa-bell",
        }
    }
}

impl From<String> for NotificationKind {
    fn from(value: String) -> Self {
        Self::from_wire(value.as_str())
    }
}

impl From<NotificationKind> for String {
    fn from(value: NotificationKind) -> Self {
        value.as_wire().to_string()
    }
}

/// Display priority derived from the importance flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPriority {
    Important,
    Action,
    Info,
}

impl NotificationPriority {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Important => "notification-important",
            Self::Action => "notification-action",
            Self::Info => "notification-info",
        }
    }
}

/// One notification as served by the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    /// Serialized as `type` to match the server payload.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: NotificationKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_read: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_important: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub requires_action: bool,
    /// Display-only. Ordering is owned by the server.
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub action_url: Option<String>,
    #[serde(default)]
    pub action_text: Option<String>,
}

impl Notification {
    /// Creates an unread notification with no action and default flags.
    pub fn new(
        id: NotificationId,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            message: message.into(),
            is_read: false,
            is_important: false,
            requires_action: false,
            created_at,
            action_url: None,
            action_text: None,
        }
    }

    /// Marks this notification as read.
    ///
    /// Returns `true` when the flag actually changed.
    pub fn mark_read(&mut self) -> bool {
        let changed = !self.is_read;
        self.is_read = true;
        changed
    }

    pub fn is_unread(&self) -> bool {
        !self.is_read
    }

    pub fn priority(&self) -> NotificationPriority {
        if self.is_important {
            NotificationPriority::Important
        } else if self.requires_action {
            NotificationPriority::Action
        } else {
            NotificationPriority::Info
        }
    }
}
