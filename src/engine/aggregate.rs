//! Cross-source averaging
//!
//! For every variation, each (algorithm, size) cell of the output is the
//! unweighted mean of the sources that reported it. Absent cells do not
//! count, and a cell nobody reported stays absent.

use crate::config::AxisSet;
use crate::models::{AverageTable, Averages, MeasurementTable, TableCollection};
use crate::{Result, SortBenchError};

/// Mean of the present values and how many there were.
///
/// Values are summed in iteration order so identical input always gives a
/// bit-identical result.
fn mean<I: IntoIterator<Item = f64>>(values: I) -> (Option<f64>, usize) {
    let (sum, count) = values
        .into_iter()
        .fold((0.0f64, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        (None, 0)
    } else {
        (Some(sum / count as f64), count)
    }
}

fn average_tables(tables: &[&MeasurementTable], algorithms: usize, sizes: usize) -> AverageTable {
    let cells = (0..algorithms)
        .flat_map(|a| (0..sizes).map(move |s| (a, s)))
        .map(|(a, s)| mean(tables.iter().filter_map(|t| t.get(a, s))))
        .collect();
    AverageTable::from_cells(algorithms, sizes, cells)
}

/// Average every variation of a collection across its sources
pub fn average(collection: &TableCollection, axes: &AxisSet) -> Result<Averages> {
    axes.validate()?;

    let dims = (axes.algorithm_count(), axes.size_count());
    if collection.variations() != axes.variations.as_slice() || collection.dims() != dims {
        return Err(SortBenchError::ConfigError(format!(
            "Table collection shaped {:?} over {} variations does not match axes shaped {:?} over {} variations",
            collection.dims(),
            collection.variations().len(),
            dims,
            axes.variations.len()
        )));
    }

    let tables = (0..axes.variations.len())
        .map(|v| {
            let per_source: Vec<&MeasurementTable> = collection.by_index(v).map(|(_, t)| t).collect();
            average_tables(&per_source, dims.0, dims.1)
        })
        .collect();

    log::debug!(
        "Averaged {} variations over {} sources",
        axes.variations.len(),
        collection.sources().len()
    );

    Ok(Averages::new(axes.variations.clone(), tables))
}
