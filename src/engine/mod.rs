//! Aggregation engine module
//!
//! Contains the table builder that turns CSV benchmark records into dense
//! per-source tables, the aggregator that averages them across sources,
//! and the diagnostics both report through.

pub mod aggregate;
pub mod builder;
pub mod diagnostics;

// Re-export commonly used types
pub use aggregate::average;
pub use builder::{build, build_concurrent, build_from_readers, source_id, TableBuilder};
pub use diagnostics::{Diagnostic, DiagnosticSink, FnSink, LogSink, RowError, SourceError};
