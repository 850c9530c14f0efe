//! Viewer panes
//!
//! Contains the table and chart renderers used by the viewer.

pub mod chart;
pub mod tables;

pub use chart::render_chart;
pub use tables::render_grid;
