//! Remote notification gateway contract.
//!
//! # Responsibility
//! - Define the server operations the synchronizer depends on.
//! - Classify every failure into a small, loggable error taxonomy.
//!
//! # Invariants
//! - Implementations never panic on malformed server payloads.
//! - A `success: false` acknowledgement is reported as `Rejected`, not `Ok`.

use crate::model::dashboard::DashboardStats;
use crate::model::notification::{Notification, NotificationId};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub mod http;

pub use http::HttpNotificationGateway;

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failure talking to the portal server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Connection, DNS, TLS or timeout failure.
    Transport(String),
    /// Server answered with a non-2xx status.
    Status { endpoint: &'static str, code: u16 },
    /// Body could not be decoded into the expected shape.
    Malformed(String),
    /// Server answered but refused the read acknowledgement.
    Rejected(NotificationId),
}

impl GatewayError {
    /// Stable machine-readable code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport_failed",
            Self::Status { .. } => "bad_status",
            Self::Malformed(_) => "malformed_response",
            Self::Rejected(_) => "ack_rejected",
        }
    }

    /// Whether the next scheduled tick may succeed without user action.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Malformed(_) => true,
            Self::Status { code, .. } => *code >= 500 || *code == 408 || *code == 429,
            Self::Rejected(_) => false,
        }
    }
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "transport error: {message}"),
            Self::Status { endpoint, code } => {
                write!(f, "unexpected status {code} from {endpoint}")
            }
            Self::Malformed(message) => write!(f, "malformed response: {message}"),
            Self::Rejected(id) => write!(f, "server rejected read acknowledgement for {id}"),
        }
    }
}

impl Error for GatewayError {}

/// Envelope returned by the notification list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NotificationPage {
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_prev: bool,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub pages: Option<u32>,
}

impl NotificationPage {
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self {
            notifications,
            ..Self::default()
        }
    }
}

/// Server operations consumed by the sync layer.
pub trait NotificationGateway: Send + Sync {
    /// Fetches the most recent page, most-recent-first.
    fn fetch_page(&self, per_page: u32) -> GatewayResult<NotificationPage>;

    /// Acknowledges that `id` was read.
    fn acknowledge_read(&self, id: NotificationId) -> GatewayResult<()>;

    /// Fetches dashboard counters for the current user.
    fn fetch_dashboard_stats(&self) -> GatewayResult<DashboardStats>;
}

impl<G: NotificationGateway + ?Sized> NotificationGateway for Arc<G> {
    fn fetch_page(&self, per_page: u32) -> GatewayResult<NotificationPage> {
        (**self).fetch_page(per_page)
    }

    fn acknowledge_read(&self, id: NotificationId) -> GatewayResult<()> {
        (**self).acknowledge_read(id)
    }

    fn fetch_dashboard_stats(&self) -> GatewayResult<DashboardStats> {
        (**self).fetch_dashboard_stats()
    }
}
