//! Pure display formatting helpers.
//!
//! # Invariants
//! - No function here reads the system clock; "now" is always a parameter.

pub mod display;
pub mod relative_time;

pub use display::{format_date, format_file_size, format_time};
pub use relative_time::format_relative;
