//! Configuration management module
//!
//! Handles loading, saving, and validation of the axis configuration
//! (variations, algorithms, sizes), the benchmark sources to ingest and
//! the presentation unit.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::util::units::TimeUnit;
use crate::{Result, SortBenchError, APP_NAME, CONFIG_FILE, DEFAULT_SOURCE};

/// Input sizes benchmarked by the harness
pub const DEFAULT_SIZES: [u64; 12] = [
    1000, 2000, 3000, 4000, 5000, 10000, 20000, 40000, 80000, 160000, 250000, 500000,
];

/// Algorithms benchmarked by the harness, in display order
pub const DEFAULT_ALGORITHMS: [&str; 6] = [
    "Insertion Sort",
    "Quick Sort",
    "Heap Sort",
    "Selection Sort",
    "Bubble Sort",
    "Merge Sort",
];

/// Dataset variations produced by the generator, in display order
pub const DEFAULT_VARIATIONS: [&str; 6] = [
    "Many Duplicates",
    "Nearly Sorted",
    "Reversed",
    "Sorted",
    "Unique Entries",
    "Random",
];

/// The three closed vocabularies every table is indexed by
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisSet {
    /// Input sizes, the column axis of every table
    pub sizes: Vec<u64>,
    /// Algorithm labels, the row axis of every table
    pub algorithms: Vec<String>,
    /// Dataset variation labels, one table per variation and source
    pub variations: Vec<String>,
}

impl Default for AxisSet {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            algorithms: DEFAULT_ALGORITHMS.iter().map(|s| s.to_string()).collect(),
            variations: DEFAULT_VARIATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AxisSet {
    /// Create an axis set from explicit lists
    pub fn new<V, A>(variations: V, algorithms: A, sizes: Vec<u64>) -> Self
    where
        V: IntoIterator,
        V::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            sizes,
            algorithms: algorithms.into_iter().map(Into::into).collect(),
            variations: variations.into_iter().map(Into::into).collect(),
        }
    }

    /// Validate the axes. Every failure here is fatal to a build or average.
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(SortBenchError::ConfigError(
                "At least one input size must be configured".to_string()
            ));
        }

        if self.sizes.contains(&0) {
            return Err(SortBenchError::ConfigError(
                "Input sizes must be greater than 0".to_string()
            ));
        }

        let mut seen = HashSet::new();
        if let Some(size) = self.sizes.iter().find(|size| !seen.insert(**size)) {
            return Err(SortBenchError::ConfigError(
                format!("Duplicate input size: {}", size)
            ));
        }

        validate_labels("algorithm", &self.algorithms)?;
        validate_labels("variation", &self.variations)?;

        Ok(())
    }

    /// Number of table rows
    pub fn algorithm_count(&self) -> usize {
        self.algorithms.len()
    }

    /// Number of table columns
    pub fn size_count(&self) -> usize {
        self.sizes.len()
    }

    /// Build the label to index lookup used while parsing rows
    pub fn index(&self) -> AxisIndex {
        AxisIndex {
            variations: position_map(self.variations.iter().cloned()),
            algorithms: position_map(self.algorithms.iter().cloned()),
            sizes: position_map(self.sizes.iter().copied()),
        }
    }
}

fn validate_labels(kind: &str, labels: &[String]) -> Result<()> {
    if labels.is_empty() {
        return Err(SortBenchError::ConfigError(
            format!("At least one {} must be configured", kind)
        ));
    }

    let mut seen = HashSet::new();
    for label in labels {
        if label.trim().is_empty() {
            return Err(SortBenchError::ConfigError(
                format!("Empty {} label", kind)
            ));
        }
        // Input labels are trimmed before lookup, so padded labels could never match
        if label.trim() != label {
            return Err(SortBenchError::ConfigError(
                format!("The {} label '{}' has surrounding whitespace", kind, label)
            ));
        }
        if !seen.insert(label.as_str()) {
            return Err(SortBenchError::ConfigError(
                format!("Duplicate {} label: {}", kind, label)
            ));
        }
    }

    Ok(())
}

fn position_map<K, I>(keys: I) -> HashMap<K, usize>
where
    K: std::hash::Hash + Eq,
    I: IntoIterator<Item = K>,
{
    keys.into_iter().enumerate().map(|(i, k)| (k, i)).collect()
}

/// Resolved label to index lookup for an [`AxisSet`]
#[derive(Debug, Clone)]
pub struct AxisIndex {
    variations: HashMap<String, usize>,
    algorithms: HashMap<String, usize>,
    sizes: HashMap<u64, usize>,
}

impl AxisIndex {
    pub fn variation(&self, label: &str) -> Option<usize> {
        self.variations.get(label).copied()
    }

    pub fn algorithm(&self, label: &str) -> Option<usize> {
        self.algorithms.get(label).copied()
    }

    pub fn size(&self, size: u64) -> Option<usize> {
        self.sizes.get(&size).copied()
    }
}

/// Engine configuration: axes, sources and presentation unit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Benchmark result files to ingest, in display order
    pub sources: Vec<PathBuf>,
    /// Unit used when presenting times
    pub unit: TimeUnit,
    /// Recognized variations, algorithms and sizes, stored as top-level keys
    #[serde(flatten)]
    pub axes: AxisSet,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sources: vec![PathBuf::from(DEFAULT_SOURCE)],
            unit: TimeUnit::default(),
            axes: AxisSet::default(),
        }
    }
}

impl EngineConfig {
    /// Create a new engine configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        self.axes.validate()?;

        let mut seen = HashSet::new();
        if let Some(source) = self.sources.iter().find(|s| !seen.insert(s.as_path())) {
            return Err(SortBenchError::ConfigError(
                format!("Source listed more than once: {}", source.display())
            ));
        }

        Ok(())
    }

    /// Replace the configured sources
    pub fn with_sources(mut self, sources: Vec<PathBuf>) -> Self {
        self.sources = sources;
        self
    }

    /// Set the presentation unit
    pub fn with_unit(mut self, unit: TimeUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Replace the axis configuration
    pub fn with_axes(mut self, axes: AxisSet) -> Self {
        self.axes = axes;
        self
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path
    /// Returns default configuration if file doesn't exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            log::debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .map_err(|e| SortBenchError::ConfigError(
                format!("Failed to read config file {}: {}", config_path.display(), e)
            ))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| SortBenchError::ConfigError(
                format!("Failed to parse config file {}: {}", config_path.display(), e)
            ))?;

        config.validate()?;
        log::debug!("Loaded config from {}", config_path.display());

        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SortBenchError::ConfigError(
                    format!("Failed to create config directory {}: {}", parent.display(), e)
                ))?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content)
            .map_err(|e| SortBenchError::ConfigError(
                format!("Failed to write config file {}: {}", config_path.display(), e)
            ))?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/sortbench/sortbench.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SortBenchError::ConfigError(
                "Unable to determine config directory".to_string()
            ))?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
