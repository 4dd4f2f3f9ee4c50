//! Use-case services outside the notification cache.
//!
//! # Responsibility
//! - Poll secondary portal endpoints with the same stale-on-failure policy
//!   as the notification synchronizer.

pub mod dashboard_service;
