//! Data models module
//!
//! Contains the benchmark record, the dense per-source measurement
//! tables and the derived average tables.

pub mod table;

// Re-export commonly used types
pub use table::{
    Averages,
    AverageTable,
    BenchmarkRecord,
    MeasurementTable,
    SourceId,
    TableCollection,
};
