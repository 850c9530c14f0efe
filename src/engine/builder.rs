//! Table builder
//!
//! Parses CSV benchmark records into one dense [`MeasurementTable`] per
//! (variation, source). Bad rows are skipped with a diagnostic, sources
//! that cannot be read are skipped as a whole, and only configuration
//! problems fail the build.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use csv::{ReaderBuilder, StringRecord, Trim};
use crate::columns;
use crate::config::{AxisIndex, AxisSet};
use crate::engine::diagnostics::{Diagnostic, DiagnosticSink, RowError, SourceError};
use crate::models::{BenchmarkRecord, MeasurementTable, SourceId, TableCollection};
use crate::{Result, SortBenchError};

/// Positions of the required columns in a source header
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    size: Option<usize>,
    variation: Option<usize>,
    algorithm: Option<usize>,
    time_taken: Option<usize>,
}

impl ColumnMap {
    fn locate(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Self {
            size: find(columns::SIZE),
            variation: find(columns::VARIATION),
            algorithm: find(columns::ALGORITHM),
            time_taken: find(columns::TIME_TAKEN),
        }
    }

    fn field<'r>(record: &'r StringRecord, column: Option<usize>, name: &'static str) -> std::result::Result<&'r str, RowError> {
        column
            .and_then(|i| record.get(i))
            .ok_or(RowError::MissingField(name))
    }

    /// Convert a raw record into a typed benchmark record
    fn parse(&self, record: &StringRecord) -> std::result::Result<BenchmarkRecord, RowError> {
        let size = Self::field(record, self.size, columns::SIZE)?;
        let variation = Self::field(record, self.variation, columns::VARIATION)?;
        let algorithm = Self::field(record, self.algorithm, columns::ALGORITHM)?;
        let time_taken = Self::field(record, self.time_taken, columns::TIME_TAKEN)?;

        let size: u64 = size.trim()
            .parse()
            .map_err(|_| RowError::InvalidSize(size.to_string()))?;

        let time_taken_ns: f64 = time_taken.trim()
            .parse()
            .map_err(|_| RowError::InvalidTime(time_taken.to_string()))?;
        if !time_taken_ns.is_finite() || time_taken_ns < 0.0 {
            return Err(RowError::InvalidTime(time_taken.to_string()));
        }

        Ok(BenchmarkRecord {
            size,
            variation: variation.trim().to_string(),
            algorithm: algorithm.trim().to_string(),
            time_taken_ns,
        })
    }
}

/// Resolved cell coordinates of an accepted record
#[derive(Debug, Clone, Copy, PartialEq)]
struct Placement {
    variation: usize,
    algorithm: usize,
    size: usize,
    nanos: f64,
}

/// Builds measurement tables for a fixed axis configuration
#[derive(Debug, Clone)]
pub struct TableBuilder {
    axes: AxisSet,
    index: AxisIndex,
}

impl TableBuilder {
    /// Create a builder, validating the axes
    pub fn new(axes: &AxisSet) -> Result<Self> {
        axes.validate()?;
        Ok(Self {
            axes: axes.clone(),
            index: axes.index(),
        })
    }

    pub fn axes(&self) -> &AxisSet {
        &self.axes
    }

    /// One all-absent table per variation
    fn empty_tables(&self) -> Vec<MeasurementTable> {
        let table = MeasurementTable::new(self.axes.algorithm_count(), self.axes.size_count());
        vec![table; self.axes.variations.len()]
    }

    fn empty_collection(&self) -> TableCollection {
        TableCollection::new(
            self.axes.variations.clone(),
            self.axes.algorithm_count(),
            self.axes.size_count(),
        )
    }

    fn place(&self, record: &BenchmarkRecord) -> std::result::Result<Placement, RowError> {
        let variation = self.index.variation(&record.variation)
            .ok_or_else(|| RowError::UnknownVariation(record.variation.clone()))?;
        let size = self.index.size(record.size)
            .ok_or(RowError::UnknownSize(record.size))?;
        let algorithm = self.index.algorithm(&record.algorithm)
            .ok_or_else(|| RowError::UnknownAlgorithm(record.algorithm.clone()))?;

        Ok(Placement {
            variation,
            algorithm,
            size,
            nanos: record.time_taken_ns,
        })
    }

    /// Parse one source into its per-variation tables.
    ///
    /// Rows are applied in source order, so a later row for the same cell
    /// replaces an earlier one.
    pub fn ingest<R: Read>(
        &self,
        source: &str,
        reader: R,
        sink: &mut dyn DiagnosticSink,
    ) -> std::result::Result<Vec<MeasurementTable>, SourceError> {
        let started = Instant::now();
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()
            .map_err(|e| SourceError::from_csv(source, &e))?
            .clone();
        let columns = ColumnMap::locate(&headers);

        let mut tables = self.empty_tables();
        let mut applied = 0usize;
        let mut skipped = 0usize;
        let mut record = StringRecord::new();

        loop {
            match reader.read_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if e.is_io_error() => return Err(SourceError::from_csv(source, &e)),
                Err(e) => {
                    skipped += 1;
                    sink.emit(Diagnostic::RowSkipped {
                        source: source.to_string(),
                        line: e.position().map(|p| p.line()).unwrap_or(0),
                        row: match e.position() {
                            Some(pos) => format!("undecodable row at byte {}", pos.byte()),
                            None => "undecodable row".to_string(),
                        },
                        reason: RowError::Malformed(e.to_string()),
                    });
                    continue;
                }
            }

            match columns.parse(&record).and_then(|r| self.place(&r)) {
                Ok(p) => {
                    tables[p.variation].set(p.algorithm, p.size, p.nanos);
                    applied += 1;
                }
                Err(reason) => {
                    skipped += 1;
                    sink.emit(Diagnostic::RowSkipped {
                        source: source.to_string(),
                        line: record.position().map(|p| p.line()).unwrap_or(0),
                        row: record.iter().collect::<Vec<_>>().join(","),
                        reason,
                    });
                }
            }
        }

        log::info!(
            "Ingested {}: {} rows applied, {} skipped in {}",
            source,
            applied,
            skipped,
            humantime::format_duration(started.elapsed())
        );

        Ok(tables)
    }

    /// Open and parse a source file
    pub fn ingest_path(
        &self,
        path: &Path,
        sink: &mut dyn DiagnosticSink,
    ) -> std::result::Result<Vec<MeasurementTable>, SourceError> {
        let source = source_id(path);
        log::debug!("Opening source {}", source);
        let file = File::open(path).map_err(|e| SourceError::from_io(&source, &e))?;
        self.ingest(&source, file, sink)
    }

    /// Add the outcome of one source to a collection
    fn merge(
        collection: &mut TableCollection,
        source: SourceId,
        outcome: std::result::Result<Vec<MeasurementTable>, SourceError>,
        sink: &mut dyn DiagnosticSink,
    ) {
        match outcome {
            Ok(tables) => collection.push_source(source, tables),
            Err(err) => {
                sink.emit(Diagnostic::SourceFailed(err.clone()));
                collection.push_failure(err);
            }
        }
    }
}

/// Source identifier used for a file path
pub fn source_id(path: &Path) -> SourceId {
    path.display().to_string()
}

fn ensure_unique<'a>(ids: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(SortBenchError::ConfigError(
                format!("Source listed more than once: {}", id)
            ));
        }
    }
    Ok(())
}

/// Build tables for every source file, one after another
pub fn build(
    sources: &[PathBuf],
    axes: &AxisSet,
    sink: &mut dyn DiagnosticSink,
) -> Result<TableCollection> {
    let builder = TableBuilder::new(axes)?;
    let ids: Vec<SourceId> = sources.iter().map(|p| source_id(p)).collect();
    ensure_unique(ids.iter().map(String::as_str))?;

    let mut collection = builder.empty_collection();
    for (path, id) in sources.iter().zip(ids) {
        let outcome = builder.ingest_path(path, sink);
        TableBuilder::merge(&mut collection, id, outcome, sink);
    }

    Ok(collection)
}

/// Build tables from in-memory readers, keyed by caller chosen identifiers
pub fn build_from_readers<R: Read>(
    sources: Vec<(SourceId, R)>,
    axes: &AxisSet,
    sink: &mut dyn DiagnosticSink,
) -> Result<TableCollection> {
    let builder = TableBuilder::new(axes)?;
    ensure_unique(sources.iter().map(|(id, _)| id.as_str()))?;

    let mut collection = builder.empty_collection();
    for (id, reader) in sources {
        let outcome = builder.ingest(&id, reader, sink);
        TableBuilder::merge(&mut collection, id, outcome, sink);
    }

    Ok(collection)
}

/// Build tables reading every source on the blocking pool.
///
/// Results and diagnostics are merged in the order of `sources`, so the
/// collection is identical to the one [`build`] produces.
pub async fn build_concurrent(
    sources: &[PathBuf],
    axes: &AxisSet,
    sink: &mut dyn DiagnosticSink,
) -> Result<TableCollection> {
    let builder = Arc::new(TableBuilder::new(axes)?);
    let ids: Vec<SourceId> = sources.iter().map(|p| source_id(p)).collect();
    ensure_unique(ids.iter().map(String::as_str))?;

    let handles: Vec<_> = sources
        .iter()
        .cloned()
        .map(|path| {
            let builder = Arc::clone(&builder);
            tokio::task::spawn_blocking(move || {
                let mut diagnostics: Vec<Diagnostic> = Vec::new();
                let outcome = builder.ingest_path(&path, &mut diagnostics);
                (outcome, diagnostics)
            })
        })
        .collect();

    let mut collection = builder.empty_collection();
    for (handle, id) in handles.into_iter().zip(ids) {
        let (outcome, diagnostics) = handle.await?;
        for diagnostic in diagnostics {
            sink.emit(diagnostic);
        }
        TableBuilder::merge(&mut collection, id, outcome, sink);
    }

    Ok(collection)
}
