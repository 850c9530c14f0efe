//! Diagnostics emitted while building tables
//!
//! Row and source failures never abort a build. They are reported to a
//! caller supplied [`DiagnosticSink`] and the build carries on.

use std::fmt;
use crate::models::SourceId;

/// Why a single row was skipped
#[derive(Debug, Clone, PartialEq)]
pub enum RowError {
    /// A required column is missing from the header or the row
    MissingField(&'static str),
    /// Dataset size is not an integer
    InvalidSize(String),
    /// Time taken is not a finite, non-negative number
    InvalidTime(String),
    /// Variation label is not one of the configured variations
    UnknownVariation(String),
    /// Algorithm label is not one of the configured algorithms
    UnknownAlgorithm(String),
    /// Size is not one of the configured sizes
    UnknownSize(u64),
    /// The CSV reader could not decode the record
    Malformed(String),
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowError::MissingField(column) => write!(f, "missing field '{}'", column),
            RowError::InvalidSize(value) => write!(f, "invalid dataset size '{}'", value),
            RowError::InvalidTime(value) => write!(f, "invalid time taken '{}'", value),
            RowError::UnknownVariation(label) => write!(f, "unknown variation '{}'", label),
            RowError::UnknownAlgorithm(label) => write!(f, "unknown algorithm '{}'", label),
            RowError::UnknownSize(size) => write!(f, "unknown dataset size {}", size),
            RowError::Malformed(msg) => write!(f, "malformed record: {}", msg),
        }
    }
}

impl std::error::Error for RowError {}

/// A source that could not be opened or read
#[derive(Debug, Clone, PartialEq)]
pub struct SourceError {
    /// Identity of the failed source
    pub source: SourceId,
    /// Underlying I/O error kind, when the failure came from I/O
    pub kind: Option<std::io::ErrorKind>,
    /// Human readable cause
    pub message: String,
}

impl SourceError {
    pub fn from_io(source: &str, err: &std::io::Error) -> Self {
        Self {
            source: source.to_string(),
            kind: Some(err.kind()),
            message: err.to_string(),
        }
    }

    pub fn from_csv(source: &str, err: &csv::Error) -> Self {
        let kind = match err.kind() {
            csv::ErrorKind::Io(io_err) => Some(io_err.kind()),
            _ => None,
        };
        Self {
            source: source.to_string(),
            kind,
            message: err.to_string(),
        }
    }

    /// Whether the source simply does not exist
    pub fn is_not_found(&self) -> bool {
        self.kind == Some(std::io::ErrorKind::NotFound)
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot read source {}: {}", self.source, self.message)
    }
}

impl std::error::Error for SourceError {}

/// A non-fatal event raised during a build
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A row was skipped and the rest of its source was still processed
    RowSkipped {
        source: SourceId,
        /// 1-based line number in the source, header included
        line: u64,
        /// Raw row content, fields joined by commas
        row: String,
        reason: RowError,
    },
    /// A whole source was skipped
    SourceFailed(SourceError),
}

impl Diagnostic {
    /// Source the diagnostic belongs to
    pub fn source(&self) -> &str {
        match self {
            Diagnostic::RowSkipped { source, .. } => source,
            Diagnostic::SourceFailed(err) => &err.source,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::RowSkipped { source, line, row, reason } => {
                write!(f, "{}:{}: skipped row [{}]: {}", source, line, row, reason)
            }
            Diagnostic::SourceFailed(err) => write!(f, "{}", err),
        }
    }
}

/// Receiver of build diagnostics
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic);
    }
}

/// Sink that forwards every diagnostic to a closure
pub struct FnSink<F>(pub F);

impl<F: FnMut(Diagnostic)> DiagnosticSink for FnSink<F> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        (self.0)(diagnostic);
    }
}

/// Sink that reports through the `log` facade and keeps counts
#[derive(Debug, Default)]
pub struct LogSink {
    pub rows_skipped: usize,
    pub sources_failed: usize,
}

impl DiagnosticSink for LogSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::RowSkipped { .. } => {
                self.rows_skipped += 1;
                log::warn!("{}", diagnostic);
            }
            Diagnostic::SourceFailed(_) => {
                self.sources_failed += 1;
                log::error!("{}", diagnostic);
            }
        }
    }
}
