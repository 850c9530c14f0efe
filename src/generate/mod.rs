//! Benchmark input dataset generator
//!
//! Produces the integer arrays the sorting harness is run on, one file per
//! dataset variation and input size.

use std::fs;
use std::path::{Path, PathBuf};
use rand::rngs::SmallRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use crate::{Result, SortBenchError};

/// Shapes of generated input data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    /// Ascending values with a tenth of positions swapped
    NearlySorted,
    /// Ascending 1..=n
    Sorted,
    /// Descending n..=1
    Reversed,
    /// Values drawn from a range a tenth the size of the dataset
    ManyDuplicates,
    /// Distinct values drawn from 1..10n
    UniqueEntries,
    /// Values drawn with replacement from 1..=10n
    Random,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 6] = [
        DatasetKind::NearlySorted,
        DatasetKind::Sorted,
        DatasetKind::Reversed,
        DatasetKind::ManyDuplicates,
        DatasetKind::UniqueEntries,
        DatasetKind::Random,
    ];

    /// Variation label, as recorded in benchmark results
    pub fn label(&self) -> &'static str {
        match self {
            DatasetKind::NearlySorted => "Nearly Sorted",
            DatasetKind::Sorted => "Sorted",
            DatasetKind::Reversed => "Reversed",
            DatasetKind::ManyDuplicates => "Many Duplicates",
            DatasetKind::UniqueEntries => "Unique Entries",
            DatasetKind::Random => "Random",
        }
    }

    /// Generate `n` values of this shape
    pub fn generate<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<u64> {
        let n64 = n as u64;
        match self {
            DatasetKind::Sorted => (1..=n64).collect(),
            DatasetKind::Reversed => (1..=n64).rev().collect(),
            DatasetKind::NearlySorted => {
                let mut data: Vec<u64> = (1..=n64).collect();
                if n >= 2 {
                    for _ in 0..n / 10 {
                        let pair = index::sample(&mut *rng, n, 2);
                        data.swap(pair.index(0), pair.index(1));
                    }
                }
                data
            }
            DatasetKind::ManyDuplicates => {
                let max = (n64 / 10).max(1);
                (0..n).map(|_| rng.gen_range(1..=max)).collect()
            }
            DatasetKind::UniqueEntries => {
                if n == 0 {
                    return Vec::new();
                }
                index::sample(rng, n * 10 - 1, n)
                    .into_iter()
                    .map(|i| i as u64 + 1)
                    .collect()
            }
            DatasetKind::Random => (0..n).map(|_| rng.gen_range(1..=n64 * 10)).collect(),
        }
    }
}

/// Dataset generator writing `<out>/<size>/<Variation>.txt`
#[derive(Debug)]
pub struct DatasetGenerator {
    rng: SmallRng,
}

impl DatasetGenerator {
    /// Generator seeded from the OS
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Reproducible generator
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn generate(&mut self, kind: DatasetKind, n: usize) -> Vec<u64> {
        kind.generate(n, &mut self.rng)
    }

    /// Write every variation for one size into `dir`
    pub fn write_size(&mut self, dir: &Path, n: usize) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(DatasetKind::ALL.len());
        for kind in DatasetKind::ALL {
            let data = self.generate(kind, n);
            let path = dir.join(format!("{}.txt", kind.label()));
            let content = data
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join("\n");
            fs::write(&path, content)?;
            log::debug!("Wrote {} values to {}", n, path.display());
            written.push(path);
        }

        Ok(written)
    }

    /// Write every variation for every size under `out_dir`
    pub fn write_all(&mut self, out_dir: &Path, sizes: &[u64]) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for &size in sizes {
            let n = usize::try_from(size).map_err(|_| {
                SortBenchError::ConfigError(format!("Dataset size {} is too large", size))
            })?;
            log::info!("Generating datasets of size {}", n);
            written.extend(self.write_size(&out_dir.join(size.to_string()), n)?);
        }
        Ok(written)
    }
}

impl Default for DatasetGenerator {
    fn default() -> Self {
        Self::new()
    }
}
