//! In-memory mirror of the last applied notification page.
//!
//! # Invariants
//! - Entries keep the server's order; the cache never sorts.
//! - A replace is wholesale: no merge with previous entries.
//! - `applied_ticket` only grows.

use crate::model::notification::{Notification, NotificationId};

/// Result of flipping one cached entry to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkReadEffect {
    /// Entry was unread and is now read.
    Changed,
    /// Entry was already read.
    AlreadyRead,
    /// No entry with that id; the cache may have been replaced meanwhile.
    Absent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationCache {
    entries: Vec<Notification>,
    applied_ticket: u64,
}

impl NotificationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all entries if `ticket` is newer than the last applied one.
    ///
    /// Returns `false` and leaves the cache untouched for stale tickets.
    pub fn replace(&mut self, entries: Vec<Notification>, ticket: u64) -> bool {
        if ticket <= self.applied_ticket {
            return false;
        }
        self.entries = entries;
        self.applied_ticket = ticket;
        true
    }

    pub fn mark_read(&mut self, id: NotificationId) -> MarkReadEffect {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                if entry.mark_read() {
                    MarkReadEffect::Changed
                } else {
                    MarkReadEffect::AlreadyRead
                }
            }
            None => MarkReadEffect::Absent,
        }
    }

    /// Counts unread entries. Recomputed on every call.
    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_unread()).count()
    }

    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    pub fn applied_ticket(&self) -> u64 {
        self.applied_ticket
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
