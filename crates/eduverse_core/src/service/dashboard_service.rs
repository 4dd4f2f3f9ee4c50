//! Dashboard statistics service.
//!
//! # Responsibility
//! - Fetch `/api/dashboard/stats` on demand or on a poll interval.
//! - Keep the last successful snapshot available to readers.
//!
//! # Invariants
//! - A failed fetch never clears or modifies the previous snapshot.

use crate::gateway::{GatewayResult, NotificationGateway};
use crate::model::dashboard::DashboardStats;
use crate::sync::scheduler::PeriodicTask;
use log::{info, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Stats poller with stale-on-failure semantics.
pub struct DashboardService<G: NotificationGateway> {
    gateway: G,
    latest: Mutex<Option<DashboardStats>>,
}

impl<G: NotificationGateway> DashboardService<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            latest: Mutex::new(None),
        }
    }

    /// Fetches fresh stats and stores them on success.
    ///
    /// # Errors
    /// - Returns the gateway error after logging it; the snapshot is kept.
    pub fn refresh(&self) -> GatewayResult<DashboardStats> {
        match self.gateway.fetch_dashboard_stats() {
            Ok(stats) => {
                info!(
                    "event=dashboard_refresh module=service status=ok unread_notifications={}",
                    stats.unread_notifications
                );
                *self.lock_latest() = Some(stats.clone());
                Ok(stats)
            }
            Err(err) => {
                warn!(
                    "event=dashboard_refresh module=service status=error error_code={} error={}",
                    err.code(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Last successfully fetched stats, if any.
    pub fn latest(&self) -> Option<DashboardStats> {
        self.lock_latest().clone()
    }

    fn lock_latest(&self) -> MutexGuard<'_, Option<DashboardStats>> {
        self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<G: NotificationGateway + 'static> DashboardService<G> {
    /// Starts a background poller calling `refresh()` every `interval`.
    pub fn spawn_polling(self: &Arc<Self>, interval: Duration) -> std::io::Result<PeriodicTask> {
        let service = Arc::clone(self);
        PeriodicTask::spawn("dashboard", interval, move || {
            let _ = service.refresh();
        })
    }
}
