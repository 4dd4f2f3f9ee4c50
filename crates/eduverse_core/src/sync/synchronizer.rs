//! Notification synchronizer.
//!
//! # Responsibility
//! - Keep the local cache eventually consistent with the server.
//! - Apply read marks optimistically and re-render badge and list.
//! - Order overlapping refreshes with monotonically increasing tickets.
//!
//! # Invariants
//! - A failed refresh leaves the cache exactly as it was.
//! - A refresh completion older than the last applied one is discarded.
//! - A failed read acknowledgement is not rolled back; the next applied
//!   refresh reconciles it.
//! - The gateway is never called while the cache lock is held.
//! - Renders are serialized and always read the cache at render time, so the
//!   last render reflects the latest state.

use super::cache::{MarkReadEffect, NotificationCache};
use super::scheduler::PeriodicTask;
use crate::clock::{Clock, SystemClock};
use crate::gateway::{GatewayResult, NotificationGateway, NotificationPage};
use crate::model::notification::{Notification, NotificationId};
use crate::present::{build_views, BadgeState, NotificationPresenter};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Sequence number handed out when a refresh is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The cache was replaced and re-rendered.
    Applied { total: usize, unread: usize },
    /// A newer refresh was already applied; this completion was dropped.
    Superseded { ticket: u64, applied: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkReadOutcome {
    pub effect: MarkReadEffect,
    /// Result of the acknowledgement request. Failures are informational.
    pub ack: GatewayResult<()>,
}

/// Owns the notification cache and drives its presenter.
///
/// Shared across poller threads and UI callbacks behind an `Arc`.
pub struct NotificationSynchronizer<G, P, C = SystemClock> {
    gateway: G,
    presenter: P,
    clock: C,
    page_size: u32,
    cache: Mutex<NotificationCache>,
    render_gate: Mutex<()>,
    next_ticket: AtomicU64,
}

impl<G, P> NotificationSynchronizer<G, P, SystemClock>
where
    G: NotificationGateway,
    P: NotificationPresenter,
{
    pub fn new(gateway: G, presenter: P, page_size: u32) -> Self {
        Self::with_clock(gateway, presenter, SystemClock, page_size)
    }
}

impl<G, P, C> NotificationSynchronizer<G, P, C>
where
    G: NotificationGateway,
    P: NotificationPresenter,
    C: Clock,
{
    /// Creates a synchronizer with an empty cache and an explicit clock.
    pub fn with_clock(gateway: G, presenter: P, clock: C, page_size: u32) -> Self {
        Self {
            gateway,
            presenter,
            clock,
            page_size: page_size.max(1),
            cache: Mutex::new(NotificationCache::new()),
            render_gate: Mutex::new(()),
            next_ticket: AtomicU64::new(0),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Pulls the latest page and applies it.
    ///
    /// # Errors
    /// - Returns the gateway error after logging it; the cache is untouched.
    pub fn refresh(&self) -> GatewayResult<RefreshOutcome> {
        let ticket = self.begin_refresh();
        let started_at = Instant::now();
        let result = self.gateway.fetch_page(self.page_size);
        debug!(
            "event=notifications_fetch module=sync ticket={} duration_ms={}",
            ticket.seq(),
            started_at.elapsed().as_millis()
        );
        self.complete_refresh(ticket, result)
    }

    /// Issues a ticket for a refresh whose fetch the caller performs.
    pub fn begin_refresh(&self) -> RefreshTicket {
        RefreshTicket(self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Applies the result of a fetch issued under `ticket`.
    ///
    /// Successful pages replace the cache only when no newer ticket has been
    /// applied. Errors are logged and returned; the cache is left untouched.
    pub fn complete_refresh(
        &self,
        ticket: RefreshTicket,
        result: GatewayResult<NotificationPage>,
    ) -> GatewayResult<RefreshOutcome> {
        let page = match result {
            Ok(page) => page,
            Err(err) => {
                warn!(
                    "event=notifications_refresh module=sync status=error ticket={} error_code={} transient={} error={}",
                    ticket.seq(),
                    err.code(),
                    err.is_transient(),
                    err
                );
                return Err(err);
            }
        };

        let outcome = {
            let mut cache = self.lock_cache();
            if cache.replace(page.notifications, ticket.seq()) {
                RefreshOutcome::Applied {
                    total: cache.len(),
                    unread: cache.unread_count(),
                }
            } else {
                RefreshOutcome::Superseded {
                    ticket: ticket.seq(),
                    applied: cache.applied_ticket(),
                }
            }
        };

        match outcome {
            RefreshOutcome::Applied { total, unread } => {
                info!(
                    "event=notifications_refresh module=sync status=ok ticket={} total={} unread={}",
                    ticket.seq(),
                    total,
                    unread
                );
                self.render();
            }
            RefreshOutcome::Superseded { ticket, applied } => {
                info!(
                    "event=notifications_refresh module=sync status=superseded ticket={} applied_ticket={}",
                    ticket, applied
                );
            }
        }
        Ok(outcome)
    }

    /// Marks `id` read locally, re-renders, then acknowledges it upstream.
    ///
    /// The presenter observes the optimistic state before the acknowledgement
    /// request is sent. An id missing from the cache changes nothing locally
    /// but is still acknowledged, since the server may hold it unread.
    ///
    /// Blocks on the acknowledgement request; UI callers that must not wait
    /// use `mark_read_detached`.
    pub fn mark_read(&self, id: NotificationId) -> MarkReadOutcome {
        let effect = self.apply_read_mark(id);
        let ack = self.acknowledge(id);
        MarkReadOutcome { effect, ack }
    }

    fn apply_read_mark(&self, id: NotificationId) -> MarkReadEffect {
        let effect = self.lock_cache().mark_read(id);
        match effect {
            MarkReadEffect::Changed => self.render(),
            MarkReadEffect::AlreadyRead => {}
            MarkReadEffect::Absent => debug!(
                "event=notification_mark_read module=sync status=absent id={}",
                id
            ),
        }
        effect
    }

    fn acknowledge(&self, id: NotificationId) -> GatewayResult<()> {
        let ack = self.gateway.acknowledge_read(id);
        match &ack {
            Ok(()) => debug!(
                "event=notification_ack module=sync status=ok id={}",
                id
            ),
            Err(err) => warn!(
                "event=notification_ack module=sync status=error id={} error_code={} error={}",
                id,
                err.code(),
                err
            ),
        }
        ack
    }

    /// Number of cached entries still unread.
    pub fn unread_count(&self) -> usize {
        self.lock_cache().unread_count()
    }

    /// Clones the cached entries in server order.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.lock_cache().entries().to_vec()
    }

    /// Re-renders list and badge from the current cache and clock.
    pub fn render(&self) {
        let _gate = self
            .render_gate
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let (entries, unread) = {
            let cache = self.lock_cache();
            (cache.entries().to_vec(), cache.unread_count())
        };
        let rows = build_views(&entries, self.clock.now(), self.page_size as usize);
        self.presenter.render_list(&rows);
        self.presenter.render_badge(BadgeState::from_unread(unread));
    }

    fn lock_cache(&self) -> MutexGuard<'_, NotificationCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<G, P, C> NotificationSynchronizer<G, P, C>
where
    G: NotificationGateway + 'static,
    P: NotificationPresenter + 'static,
    C: Clock + 'static,
{
    /// Starts a background poller calling `refresh()` every `interval`.
    ///
    /// The first refresh runs immediately. Failures are logged by `refresh`.
    pub fn spawn_polling(self: &Arc<Self>, interval: Duration) -> std::io::Result<PeriodicTask> {
        let sync = Arc::clone(self);
        PeriodicTask::spawn("notifications", interval, move || {
            let _ = sync.refresh();
        })
    }

    /// Applies the read mark and renders on the calling thread, then sends
    /// the acknowledgement from a worker thread.
    ///
    /// Returns once the optimistic render is done; the handle yields the
    /// acknowledgement result, which is already logged.
    ///
    /// # Errors
    /// - Returns the OS error when the worker cannot be spawned. The local
    ///   read mark is kept in that case.
    pub fn mark_read_detached(
        self: &Arc<Self>,
        id: NotificationId,
    ) -> std::io::Result<(MarkReadEffect, JoinHandle<GatewayResult<()>>)> {
        let effect = self.apply_read_mark(id);
        let sync = Arc::clone(self);
        let handle = thread::Builder::new()
            .name("eduverse-ack".to_string())
            .spawn(move || sync.acknowledge(id))?;
        Ok((effect, handle))
    }
}
