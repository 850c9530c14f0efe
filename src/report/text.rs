//! Plain-text table rendering
//!
//! Lays out algorithm × size grids as aligned text for terminal output.

use std::fmt::Write;
use crate::config::AxisSet;
use crate::engine::Diagnostic;
use crate::models::{Averages, TableCollection};
use crate::util::units::{format_cell, TimeUnit};

/// Render one grid. `cell(a, s)` yields the canonical value at a position.
pub fn render_grid<F>(axes: &AxisSet, unit: TimeUnit, cell: F) -> String
where
    F: Fn(usize, usize) -> Option<f64>,
{
    let label_width = axes
        .algorithms
        .iter()
        .map(|a| a.chars().count())
        .max()
        .unwrap_or(0)
        .max(unit.abbreviation().chars().count() + 2);

    let body: Vec<Vec<String>> = (0..axes.algorithm_count())
        .map(|a| (0..axes.size_count()).map(|s| format_cell(cell(a, s), unit)).collect())
        .collect();

    let widths: Vec<usize> = axes
        .sizes
        .iter()
        .enumerate()
        .map(|(s, size)| {
            body.iter()
                .map(|row| row[s].chars().count())
                .chain(std::iter::once(size.to_string().len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let _ = write!(out, "{:<width$}", format!("[{}]", unit.abbreviation()), width = label_width);
    for (size, width) in axes.sizes.iter().zip(&widths) {
        let _ = write!(out, "  {:>width$}", size, width = *width);
    }
    out.push('\n');

    for (algorithm, row) in axes.algorithms.iter().zip(&body) {
        let _ = write!(out, "{:<width$}", algorithm, width = label_width);
        for (value, width) in row.iter().zip(&widths) {
            let _ = write!(out, "  {:>width$}", value, width = *width);
        }
        out.push('\n');
    }

    out
}

/// Render every source table and the average of every variation
pub fn render_report(
    axes: &AxisSet,
    collection: &TableCollection,
    averages: &Averages,
    unit: TimeUnit,
) -> String {
    let mut out = String::new();

    for (v, variation) in axes.variations.iter().enumerate() {
        let _ = writeln!(out, "=== {} ===", variation);

        for (source, table) in collection.by_index(v) {
            let _ = writeln!(out, "Data from {} for {}:", source, variation);
            if table.is_empty() {
                out.push_str("No valid data available for this variation.\n");
            } else {
                out.push_str(&render_grid(axes, unit, |a, s| table.get(a, s)));
            }
            out.push('\n');
        }

        let _ = writeln!(out, "Averages for {}:", variation);
        match averages.by_index(v) {
            Some(table) if table.has_data() => {
                out.push_str(&render_grid(axes, unit, |a, s| table.get(a, s)));
            }
            _ => out.push_str("No data\n"),
        }
        out.push('\n');
    }

    for failure in collection.failures() {
        let _ = writeln!(out, "Skipped source: {}", failure);
    }

    out
}

/// List every skipped row, one diagnostic per line. Empty when none were skipped.
pub fn render_skipped_rows(diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();
    for diagnostic in diagnostics {
        if let Diagnostic::RowSkipped { .. } = diagnostic {
            if out.is_empty() {
                out.push_str("Skipped rows:\n");
            }
            let _ = writeln!(out, "  {}", diagnostic);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{average, build_from_readers, Diagnostic};

    #[test]
    fn test_render_grid_alignment() {
        let axes = AxisSet::new(["Sorted"], ["Quick Sort", "Heap"], vec![10, 20000]);
        let text = render_grid(&axes, TimeUnit::Nanosecond, |a, s| {
            if a == 0 && s == 1 { Some(123456.0) } else { None }
        });
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "[ns]        10   20000");
        assert_eq!(lines[1], "Quick Sort   -  123456");
        assert_eq!(lines[2], "Heap         -       -");
    }

    #[test]
    fn test_render_report_sections() {
        let axes = AxisSet::new(["Sorted", "Random"], ["Quick Sort"], vec![1000]);
        let csv = "Dataset Size,Dataset Variation,Sorting Algorithm,Time Taken\n1000,Sorted,Quick Sort,2000000\n";
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let collection =
            build_from_readers(vec![("run.csv".to_string(), csv.as_bytes())], &axes, &mut diagnostics).unwrap();
        let averages = average(&collection, &axes).unwrap();

        let text = render_report(&axes, &collection, &averages, TimeUnit::Millisecond);
        assert!(text.contains("=== Sorted ==="));
        assert!(text.contains("Data from run.csv for Sorted:"));
        assert!(text.contains("2.000"));
        assert!(text.contains("Data from run.csv for Random:\nNo valid data available for this variation."));
        assert!(text.contains("Averages for Random:\nNo data"));
    }

    #[test]
    fn test_skipped_rows_are_listed() {
        let axes = AxisSet::new(["Sorted"], ["Quick Sort"], vec![1000]);
        let csv = "Dataset Size,Dataset Variation,Sorting Algorithm,Time Taken\n\
                   abc,Sorted,Quick Sort,5\n\
                   1000,Sorted,Quick Sort,7\n";
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        build_from_readers(vec![("r.csv".to_string(), csv.as_bytes())], &axes, &mut diagnostics).unwrap();

        let text = render_skipped_rows(&diagnostics);
        assert_eq!(
            text,
            "Skipped rows:\n  r.csv:2: skipped row [abc,Sorted,Quick Sort,5]: invalid dataset size 'abc'\n"
        );
        assert!(render_skipped_rows(&[]).is_empty());
    }
}
