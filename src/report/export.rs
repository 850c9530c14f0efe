//! JSON report export
//!
//! Serializes the per-source tables and the averages of every variation,
//! converted to the presentation unit, into a versioned JSON document.

use std::fs;
use std::path::Path;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::config::AxisSet;
use crate::engine::SourceError;
use crate::models::{Averages, TableCollection};
use crate::util::units::TimeUnit;
use crate::{Result, SortBenchError};

/// Current report format version
pub const REPORT_VERSION: u32 = 1;

/// Top level JSON report document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub version: u32,
    /// When the report was generated
    pub generated_at: DateTime<Utc>,
    /// Unit every cell is expressed in
    pub unit: TimeUnit,
    pub sizes: Vec<u64>,
    pub algorithms: Vec<String>,
    pub variations: Vec<VariationReport>,
    pub failed_sources: Vec<FailedSource>,
}

/// Tables of one variation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariationReport {
    pub variation: String,
    pub sources: Vec<SourceReport>,
    pub average: AverageReport,
}

/// Cells of one source, `[algorithm][size]`, absent as `null`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceReport {
    pub source: String,
    pub cells: Vec<Vec<Option<f64>>>,
}

/// Averaged cells plus the number of sources behind each
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AverageReport {
    pub cells: Vec<Vec<Option<f64>>>,
    pub samples: Vec<Vec<usize>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedSource {
    pub source: String,
    pub error: String,
}

impl From<&SourceError> for FailedSource {
    fn from(err: &SourceError) -> Self {
        Self {
            source: err.source.clone(),
            error: err.message.clone(),
        }
    }
}

fn convert(row: &[Option<f64>], unit: TimeUnit) -> Vec<Option<f64>> {
    row.iter().map(|cell| cell.map(|ns| unit.from_nanos(ns))).collect()
}

impl Report {
    /// Assemble a report from built and averaged tables
    pub fn new(
        axes: &AxisSet,
        collection: &TableCollection,
        averages: &Averages,
        unit: TimeUnit,
    ) -> Self {
        let algorithms = axes.algorithm_count();
        let sizes = axes.size_count();

        let variations = axes
            .variations
            .iter()
            .enumerate()
            .map(|(v, variation)| {
                let sources = collection
                    .by_index(v)
                    .map(|(source, table)| SourceReport {
                        source: source.to_string(),
                        cells: (0..algorithms).map(|a| convert(table.row(a).unwrap_or_default(), unit)).collect(),
                    })
                    .collect();

                let average = match averages.by_index(v) {
                    Some(table) => AverageReport {
                        cells: (0..algorithms).map(|a| convert(table.row(a).unwrap_or_default(), unit)).collect(),
                        samples: (0..algorithms)
                            .map(|a| (0..sizes).map(|s| table.samples(a, s)).collect())
                            .collect(),
                    },
                    None => AverageReport {
                        cells: vec![vec![None; sizes]; algorithms],
                        samples: vec![vec![0; sizes]; algorithms],
                    },
                };

                VariationReport {
                    variation: variation.clone(),
                    sources,
                    average,
                }
            })
            .collect();

        Self {
            version: REPORT_VERSION,
            generated_at: Utc::now(),
            unit,
            sizes: axes.sizes.clone(),
            algorithms: axes.algorithms.clone(),
            variations,
            failed_sources: collection.failures().iter().map(FailedSource::from).collect(),
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report to a file, creating parent directories
    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| SortBenchError::ReportError(
                        format!("Failed to create report directory {}: {}", parent.display(), e)
                    ))?;
            }
        }

        let content = self.to_json()?;

        fs::write(path, content)
            .map_err(|e| SortBenchError::ReportError(
                format!("Failed to write report file {}: {}", path.display(), e)
            ))?;

        log::info!("Wrote report to {}", path.display());
        Ok(())
    }

    /// Load a previously written report
    pub fn read_json(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| SortBenchError::ReportError(
                format!("Failed to read report file {}: {}", path.display(), e)
            ))?;

        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{average, build_from_readers, Diagnostic};
    use tempfile::TempDir;

    fn sample() -> (AxisSet, TableCollection, Averages) {
        let axes = AxisSet::new(["Sorted", "Random"], ["Quick Sort"], vec![1000, 2000]);
        let header = "Dataset Size,Dataset Variation,Sorting Algorithm,Time Taken\n";
        let a = format!("{}1000,Sorted,Quick Sort,5000000\n", header);
        let b = format!("{}1000,Sorted,Quick Sort,7000000\n", header);
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let collection = build_from_readers(
            vec![("a".to_string(), a.as_bytes()), ("b".to_string(), b.as_bytes())],
            &axes,
            &mut diagnostics,
        )
        .unwrap();
        let averages = average(&collection, &axes).unwrap();
        (axes, collection, averages)
    }

    #[test]
    fn test_report_converts_units() {
        let (axes, collection, averages) = sample();
        let report = Report::new(&axes, &collection, &averages, TimeUnit::Millisecond);

        assert_eq!(report.variations.len(), 2);
        let sorted = &report.variations[0];
        assert_eq!(sorted.variation, "Sorted");
        assert_eq!(sorted.sources.len(), 2);
        assert_eq!(sorted.sources[0].cells[0], vec![Some(5.0), None]);
        assert_eq!(sorted.average.cells[0], vec![Some(6.0), None]);
        assert_eq!(sorted.average.samples[0], vec![2, 0]);
        assert!(report.failed_sources.is_empty());
    }

    #[test]
    fn test_report_json_shape() {
        let (axes, collection, averages) = sample();
        let report = Report::new(&axes, &collection, &averages, TimeUnit::Nanosecond);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(value["version"], 1);
        assert_eq!(value["unit"], "nanosecond");
        assert_eq!(value["sizes"][1], 2000);
        assert!(value["variations"][1]["average"]["cells"][0][0].is_null());
        assert_eq!(value["variations"][0]["average"]["cells"][0][0], 6000000.0);
    }

    #[test]
    fn test_write_and_read_report() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("report.json");
        let (axes, collection, averages) = sample();
        let report = Report::new(&axes, &collection, &averages, TimeUnit::Second);

        report.write_json(&path).unwrap();
        let loaded = Report::read_json(&path).unwrap();
        assert_eq!(loaded.version, REPORT_VERSION);
        assert_eq!(loaded.unit, TimeUnit::Second);
        assert_eq!(loaded.algorithms, vec!["Quick Sort".to_string()]);
    }
}
