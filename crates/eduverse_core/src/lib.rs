//! Client-side notification sync core for the EduVerse portal.
//! This crate owns the notification cache and its consistency rules; UI
//! toolkits plug in through `NotificationPresenter`.

pub mod clock;
pub mod config;
pub mod format;
pub mod gateway;
pub mod logging;
pub mod model;
pub mod present;
pub mod service;
pub mod sync;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, ConfigResult, SyncConfig};
pub use format::{format_date, format_file_size, format_relative, format_time};
pub use gateway::{
    GatewayError, GatewayResult, HttpNotificationGateway, NotificationGateway, NotificationPage,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::dashboard::DashboardStats;
pub use model::notification::{
    Notification, NotificationId, NotificationKind, NotificationPriority,
};
pub use present::{
    build_views, BadgeState, NotificationAction, NotificationPresenter, NotificationView,
    TextPresenter,
};
pub use service::dashboard_service::DashboardService;
pub use sync::cache::{MarkReadEffect, NotificationCache};
pub use sync::scheduler::PeriodicTask;
pub use sync::synchronizer::{
    MarkReadOutcome, NotificationSynchronizer, RefreshOutcome, RefreshTicket,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
