//! Utility functions module
//!
//! Contains time unit conversion and cell formatting helpers.

pub mod units;

// Re-export commonly used functions
pub use units::{format_cell, format_time, TimeUnit};
