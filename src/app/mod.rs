//! Terminal viewer module
//!
//! Contains the terminal user interface that browses built tables and
//! their averages by variation.

pub mod app;
pub mod screens;
pub mod state;
pub mod tui;

pub use app::{App, IngestSummary};
pub use state::{NavigationAction, Pane, ViewState};
pub use tui::Tui;
