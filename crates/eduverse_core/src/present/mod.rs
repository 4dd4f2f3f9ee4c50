//! Presenter seam between the synchronizer and a UI toolkit.
//!
//! # Responsibility
//! - Project cached notifications into display rows with resolved classes
//!   and age labels.
//! - Define the badge state and the presenter trait the synchronizer drives.
//!
//! # Invariants
//! - Rows keep cache order; projection never re-sorts.
//! - The badge is hidden exactly when the unread count is zero.

use crate::format::format_relative;
use crate::model::notification::{Notification, NotificationId};
use chrono::{DateTime, Utc};
use std::fmt::{Display, Formatter};

pub mod text;

pub use text::TextPresenter;

/// Unread badge state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeState {
    Hidden,
    Count(usize),
}

impl BadgeState {
    pub fn from_unread(count: usize) -> Self {
        if count == 0 {
            Self::Hidden
        } else {
            Self::Count(count)
        }
    }

    pub fn is_visible(self) -> bool {
        matches!(self, Self::Count(_))
    }
}

impl Display for BadgeState {
    /// Renders the badge text; a hidden badge renders as an empty string.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hidden => Ok(()),
            Self::Count(count) => write!(f, "{count}"),
        }
    }
}

/// Navigation target attached to a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationAction {
    pub url: String,
    pub label: Option<String>,
}

/// One rendered notification row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub id: NotificationId,
    pub icon_class: &'static str,
    pub priority_class: &'static str,
    pub title: String,
    pub message: String,
    pub age: String,
    pub unread: bool,
    pub action: Option<NotificationAction>,
}

impl NotificationView {
    pub fn project(notification: &Notification, now: DateTime<Utc>) -> Self {
        let action = notification
            .action_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| NotificationAction {
                url: url.to_string(),
                label: notification.action_text.clone(),
            });

        Self {
            id: notification.id,
            icon_class: notification.kind.icon_class(),
            priority_class: notification.priority().css_class(),
            title: notification.title.clone(),
            message: notification.message.clone(),
            age: format_relative(now, notification.created_at),
            unread: notification.is_unread(),
            action,
        }
    }
}

/// Projects at most `limit` rows in cache order.
pub fn build_views(
    notifications: &[Notification],
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<NotificationView> {
    notifications
        .iter()
        .take(limit)
        .map(|notification| NotificationView::project(notification, now))
        .collect()
}

/// Receives render calls from the synchronizer.
///
/// Implementations own empty-state text; an empty slice means "no
/// notifications". Calls may arrive from poller threads.
pub trait NotificationPresenter: Send + Sync {
    fn render_list(&self, rows: &[NotificationView]);
    fn render_badge(&self, badge: BadgeState);
}

impl<P: NotificationPresenter + ?Sized> NotificationPresenter for std::sync::Arc<P> {
    fn render_list(&self, rows: &[NotificationView]) {
        (**self).render_list(rows)
    }

    fn render_badge(&self, badge: BadgeState) {
        (**self).render_badge(badge)
    }
}
