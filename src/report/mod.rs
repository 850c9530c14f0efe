//! Report module
//!
//! Presents built and averaged tables as aligned plain text or as a JSON
//! document. All unit conversion happens here, never in the tables.

pub mod export;
pub mod text;

pub use export::{Report, REPORT_VERSION};
pub use text::{render_grid, render_report, render_skipped_rows};
