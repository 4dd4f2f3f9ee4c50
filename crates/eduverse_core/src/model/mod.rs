//! Domain records mirrored from the portal server.
//!
//! # Responsibility
//! - Define wire-compatible notification and dashboard records.
//! - Map server tags to exhaustive enums with a default arm for unknown values.
//!
//! # Invariants
//! - Every notification is identified by a stable, server-assigned
//!   `NotificationId`.
//! - Decoding never fails on an unrecognized notification type.

pub mod dashboard;
pub mod notification;
mod wire;
