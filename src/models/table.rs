//! Dense measurement table data models
//!
//! Every table is a fixed `[algorithms × sizes]` grid of optional
//! nanosecond values. `None` marks a cell with no observation, which is
//! never the same thing as a zero measurement.

use crate::engine::SourceError;

/// Identifier of one benchmark source (usually the file path)
pub type SourceId = String;

/// One raw observation parsed from a source row
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRecord {
    /// Input size the algorithm was run on
    pub size: u64,
    /// Dataset variation label, trimmed
    pub variation: String,
    /// Sorting algorithm label, trimmed
    pub algorithm: String,
    /// Measured time in nanoseconds
    pub time_taken_ns: f64,
}

/// Measurements of a single source for a single variation
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementTable {
    algorithms: usize,
    sizes: usize,
    cells: Vec<Option<f64>>,
}

impl MeasurementTable {
    /// Create a table with every cell absent
    pub fn new(algorithms: usize, sizes: usize) -> Self {
        Self {
            algorithms,
            sizes,
            cells: vec![None; algorithms * sizes],
        }
    }

    /// Table shape as (algorithms, sizes)
    pub fn dims(&self) -> (usize, usize) {
        (self.algorithms, self.sizes)
    }

    /// Value at (algorithm, size), `None` when absent or out of range
    pub fn get(&self, algorithm: usize, size: usize) -> Option<f64> {
        if algorithm >= self.algorithms || size >= self.sizes {
            return None;
        }
        self.cells[algorithm * self.sizes + size]
    }

    /// Record a value, replacing any earlier one for the same cell
    pub(crate) fn set(&mut self, algorithm: usize, size: usize, nanos: f64) {
        debug_assert!(algorithm < self.algorithms && size < self.sizes);
        self.cells[algorithm * self.sizes + size] = Some(nanos);
    }

    /// All cells of one algorithm, ordered by size; `None` past the last algorithm
    pub fn row(&self, algorithm: usize) -> Option<&[Option<f64>]> {
        if algorithm >= self.algorithms {
            return None;
        }
        let start = algorithm * self.sizes;
        Some(&self.cells[start..start + self.sizes])
    }

    /// Rows in algorithm order
    pub fn rows(&self) -> impl Iterator<Item = &[Option<f64>]> {
        self.cells.chunks(self.sizes.max(1)).take(self.algorithms)
    }

    /// Number of cells holding a measurement
    pub fn observed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Whether no cell holds a measurement
    pub fn is_empty(&self) -> bool {
        self.observed_count() == 0
    }
}

/// Per-variation, per-source measurement tables produced by one build
#[derive(Debug, Clone)]
pub struct TableCollection {
    variations: Vec<String>,
    dims: (usize, usize),
    sources: Vec<SourceId>,
    /// Indexed `[variation][source]`
    tables: Vec<Vec<MeasurementTable>>,
    failures: Vec<SourceError>,
}

impl TableCollection {
    pub(crate) fn new(variations: Vec<String>, algorithms: usize, sizes: usize) -> Self {
        let tables = variations.iter().map(|_| Vec::new()).collect();
        Self {
            variations,
            dims: (algorithms, sizes),
            sources: Vec::new(),
            tables,
            failures: Vec::new(),
        }
    }

    /// Append the tables of one source, one per variation in axis order
    pub(crate) fn push_source(&mut self, source: SourceId, tables: Vec<MeasurementTable>) {
        debug_assert_eq!(tables.len(), self.variations.len());
        for (per_variation, table) in self.tables.iter_mut().zip(tables) {
            per_variation.push(table);
        }
        self.sources.push(source);
    }

    pub(crate) fn push_failure(&mut self, failure: SourceError) {
        self.failures.push(failure);
    }

    /// Variation labels in axis order
    pub fn variations(&self) -> &[String] {
        &self.variations
    }

    /// Contributing sources in the order they were supplied
    pub fn sources(&self) -> &[SourceId] {
        &self.sources
    }

    /// Shape shared by every table as (algorithms, sizes)
    pub fn dims(&self) -> (usize, usize) {
        self.dims
    }

    /// Sources that could not be opened or read
    pub fn failures(&self) -> &[SourceError] {
        &self.failures
    }

    /// Table for a (variation, source) pair
    pub fn table(&self, variation: &str, source: &str) -> Option<&MeasurementTable> {
        let v = self.variations.iter().position(|l| l == variation)?;
        let s = self.sources.iter().position(|id| id == source)?;
        self.tables[v].get(s)
    }

    /// All source tables of one variation, in source order
    pub fn tables_for(&self, variation: &str) -> Option<impl Iterator<Item = (&str, &MeasurementTable)>> {
        let v = self.variations.iter().position(|l| l == variation)?;
        Some(self.by_index(v))
    }

    /// All source tables of the variation at `index`, in source order
    pub fn by_index(&self, index: usize) -> impl Iterator<Item = (&str, &MeasurementTable)> {
        self.sources
            .iter()
            .map(String::as_str)
            .zip(self.tables.get(index).into_iter().flatten())
    }
}

/// Cross-source average for a single variation
#[derive(Debug, Clone, PartialEq)]
pub struct AverageTable {
    algorithms: usize,
    sizes: usize,
    cells: Vec<Option<f64>>,
    samples: Vec<usize>,
}

impl AverageTable {
    pub(crate) fn from_cells(algorithms: usize, sizes: usize, cells: Vec<(Option<f64>, usize)>) -> Self {
        debug_assert_eq!(cells.len(), algorithms * sizes);
        let (cells, samples) = cells.into_iter().unzip();
        Self {
            algorithms,
            sizes,
            cells,
            samples,
        }
    }

    /// Table shape as (algorithms, sizes)
    pub fn dims(&self) -> (usize, usize) {
        (self.algorithms, self.sizes)
    }

    /// Mean nanoseconds at (algorithm, size), `None` when no source reported it
    pub fn get(&self, algorithm: usize, size: usize) -> Option<f64> {
        if algorithm >= self.algorithms || size >= self.sizes {
            return None;
        }
        self.cells[algorithm * self.sizes + size]
    }

    /// Number of sources that contributed to the cell
    pub fn samples(&self, algorithm: usize, size: usize) -> usize {
        if algorithm >= self.algorithms || size >= self.sizes {
            return 0;
        }
        self.samples[algorithm * self.sizes + size]
    }

    /// All averages of one algorithm, ordered by size; `None` past the last algorithm
    pub fn row(&self, algorithm: usize) -> Option<&[Option<f64>]> {
        if algorithm >= self.algorithms {
            return None;
        }
        let start = algorithm * self.sizes;
        Some(&self.cells[start..start + self.sizes])
    }

    /// Whether any cell holds an average
    pub fn has_data(&self) -> bool {
        self.cells.iter().any(Option::is_some)
    }
}

/// Average tables keyed by variation, in axis order
#[derive(Debug, Clone, PartialEq)]
pub struct Averages {
    variations: Vec<String>,
    tables: Vec<AverageTable>,
}

impl Averages {
    pub(crate) fn new(variations: Vec<String>, tables: Vec<AverageTable>) -> Self {
        debug_assert_eq!(variations.len(), tables.len());
        Self { variations, tables }
    }

    /// Average table of one variation
    pub fn get(&self, variation: &str) -> Option<&AverageTable> {
        let v = self.variations.iter().position(|l| l == variation)?;
        self.tables.get(v)
    }

    /// Average table of the variation at `index`
    pub fn by_index(&self, index: usize) -> Option<&AverageTable> {
        self.tables.get(index)
    }

    /// (variation, table) pairs in axis order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AverageTable)> {
        self.variations.iter().map(String::as_str).zip(self.tables.iter())
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_is_all_absent() {
        let table = MeasurementTable::new(3, 4);
        assert_eq!(table.dims(), (3, 4));
        assert!(table.is_empty());
        for a in 0..3 {
            assert!(table.row(a).unwrap().iter().all(Option::is_none));
        }
    }

    #[test]
    fn test_zero_is_not_absent() {
        let mut table = MeasurementTable::new(2, 2);
        table.set(1, 0, 0.0);
        assert_eq!(table.get(1, 0), Some(0.0));
        assert_eq!(table.get(0, 0), None);
        assert_eq!(table.observed_count(), 1);
    }

    #[test]
    fn test_set_overwrites() {
        let mut table = MeasurementTable::new(1, 1);
        table.set(0, 0, 10.0);
        table.set(0, 0, 20.0);
        assert_eq!(table.get(0, 0), Some(20.0));
    }

    #[test]
    fn test_out_of_range_reads_absent() {
        let table = MeasurementTable::new(2, 2);
        assert_eq!(table.get(2, 0), None);
        assert_eq!(table.get(0, 5), None);
        assert!(table.row(2).is_none());
        assert_eq!(table.row(1).map(<[Option<f64>]>::len), Some(2));

        let averages = AverageTable::from_cells(1, 2, vec![(Some(1.0), 1), (None, 0)]);
        assert_eq!(averages.row(0), Some(&[Some(1.0), None][..]));
        assert!(averages.row(1).is_none());
    }

    #[test]
    fn test_rows_in_order() {
        let mut table = MeasurementTable::new(2, 3);
        table.set(1, 2, 7.0);
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], &[None, None, Some(7.0)]);
    }

    #[test]
    fn test_collection_lookup() {
        let mut collection = TableCollection::new(vec!["Sorted".into(), "Random".into()], 1, 1);
        let mut sorted = MeasurementTable::new(1, 1);
        sorted.set(0, 0, 5.0);
        collection.push_source("a.csv".into(), vec![sorted, MeasurementTable::new(1, 1)]);

        assert_eq!(collection.sources(), ["a.csv".to_string()]);
        assert_eq!(collection.table("Sorted", "a.csv").unwrap().get(0, 0), Some(5.0));
        assert!(collection.table("Random", "a.csv").unwrap().is_empty());
        assert!(collection.table("Reversed", "a.csv").is_none());
        assert!(collection.table("Sorted", "b.csv").is_none());
        assert_eq!(collection.tables_for("Sorted").unwrap().count(), 1);
    }

    #[test]
    fn test_average_table_accessors() {
        let table = AverageTable::from_cells(1, 2, vec![(Some(3.0), 2), (None, 0)]);
        assert_eq!(table.get(0, 0), Some(3.0));
        assert_eq!(table.samples(0, 0), 2);
        assert_eq!(table.get(0, 1), None);
        assert_eq!(table.samples(0, 1), 0);
        assert!(table.has_data());
    }
}
