//! Client-side notification state synchronization.
//!
//! # Responsibility
//! - Mirror the server's notification page in a process-local cache.
//! - Drive the presenter after every applied change.
//! - Poll the server on a fixed interval.
//!
//! # Invariants
//! - The cache has exactly one owner: `NotificationSynchronizer`.
//! - Cache state is never persisted; it lives for the process only.

pub mod cache;
pub mod scheduler;
pub mod synchronizer;
