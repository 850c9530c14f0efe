//! SortBench - sorting benchmark aggregation
//!
//! Parses recorded sorting benchmark results into dense per-run tables,
//! averages them across runs and presents them in a terminal viewer or
//! as plain-text and JSON reports.

use std::fmt;

// Public re-exports
pub mod app;
pub mod config;
pub mod engine;
pub mod generate;
pub mod models;
pub mod report;
pub mod util;

pub use config::{AxisSet, EngineConfig};
pub use engine::{average, build, Diagnostic, DiagnosticSink, RowError, SourceError};
pub use models::{AverageTable, MeasurementTable, TableCollection};
pub use util::units::TimeUnit;

// Common error types
#[derive(Debug)]
pub enum SortBenchError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Axis configuration is empty, inconsistent or unreadable
    ConfigError(String),
    /// Report rendering or export error
    ReportError(String),
    /// TUI rendering or interaction error
    TuiError(String),
    /// Background ingestion task failed to complete
    TaskError(String),
}

impl fmt::Display for SortBenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortBenchError::IoError(err) => write!(f, "I/O error: {}", err),
            SortBenchError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            SortBenchError::ReportError(msg) => write!(f, "Report error: {}", msg),
            SortBenchError::TuiError(msg) => write!(f, "TUI error: {}", msg),
            SortBenchError::TaskError(msg) => write!(f, "Task error: {}", msg),
        }
    }
}

impl std::error::Error for SortBenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SortBenchError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SortBenchError {
    fn from(err: std::io::Error) -> Self {
        SortBenchError::IoError(err)
    }
}

impl From<csv::Error> for SortBenchError {
    fn from(err: csv::Error) -> Self {
        match err.into_kind() {
            csv::ErrorKind::Io(io) => SortBenchError::IoError(io),
            kind => SortBenchError::ReportError(format!("CSV error: {:?}", kind)),
        }
    }
}

impl From<serde_json::Error> for SortBenchError {
    fn from(err: serde_json::Error) -> Self {
        SortBenchError::ReportError(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::de::Error> for SortBenchError {
    fn from(err: toml::de::Error) -> Self {
        SortBenchError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for SortBenchError {
    fn from(err: toml::ser::Error) -> Self {
        SortBenchError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

impl From<tokio::task::JoinError> for SortBenchError {
    fn from(err: tokio::task::JoinError) -> Self {
        SortBenchError::TaskError(format!("ingestion task did not complete: {}", err))
    }
}

/// Result type alias for SortBench operations
pub type Result<T> = std::result::Result<T, SortBenchError>;

/// Error handling utilities
pub mod error {
    use super::SortBenchError;

    /// Convert error to user-friendly message with suggestions
    pub fn user_friendly_message(error: &SortBenchError) -> String {
        match error {
            SortBenchError::ConfigError(msg) => {
                format!("Configuration error: {}. Check sortbench.toml or the command line.", msg)
            }
            SortBenchError::IoError(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
                "Permission denied. Check file permissions.".to_string()
            }
            SortBenchError::ReportError(_) => {
                "Failed to write the report. Check the output path and disk space.".to_string()
            }
            _ => error.to_string(),
        }
    }
}

// Common types and constants
pub const APP_NAME: &str = "sortbench";
pub const CONFIG_FILE: &str = "sortbench.toml";
pub const DEFAULT_SOURCE: &str = "results.csv";

/// CSV column headers written by the benchmark harness
pub mod columns {
    pub const SIZE: &str = "Dataset Size";
    pub const VARIATION: &str = "Dataset Variation";
    pub const ALGORITHM: &str = "Sorting Algorithm";
    pub const TIME_TAKEN: &str = "Time Taken";
}
