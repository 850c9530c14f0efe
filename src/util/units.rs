//! Time unit conversion and formatting utilities
//!
//! Measurements are stored in nanoseconds everywhere. Conversion to a
//! named unit only happens when values are presented.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named presentation units for canonical nanosecond values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[default]
    Nanosecond,
    Microsecond,
    Millisecond,
    Second,
    Minute,
    Hour,
}

impl TimeUnit {
    /// All units from smallest to largest
    pub const ALL: [TimeUnit; 6] = [
        TimeUnit::Nanosecond,
        TimeUnit::Microsecond,
        TimeUnit::Millisecond,
        TimeUnit::Second,
        TimeUnit::Minute,
        TimeUnit::Hour,
    ];

    /// Number of nanoseconds in one of this unit
    pub fn factor(&self) -> f64 {
        match self {
            TimeUnit::Nanosecond => 1.0,
            TimeUnit::Microsecond => 1e3,
            TimeUnit::Millisecond => 1e6,
            TimeUnit::Second => 1e9,
            TimeUnit::Minute => 6e10,
            TimeUnit::Hour => 3.6e12,
        }
    }

    /// Short suffix used in table headers and axis titles
    pub fn abbreviation(&self) -> &'static str {
        match self {
            TimeUnit::Nanosecond => "ns",
            TimeUnit::Microsecond => "µs",
            TimeUnit::Millisecond => "ms",
            TimeUnit::Second => "s",
            TimeUnit::Minute => "min",
            TimeUnit::Hour => "h",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TimeUnit::Nanosecond => "nanosecond",
            TimeUnit::Microsecond => "microsecond",
            TimeUnit::Millisecond => "millisecond",
            TimeUnit::Second => "second",
            TimeUnit::Minute => "minute",
            TimeUnit::Hour => "hour",
        }
    }

    /// Convert a canonical nanosecond value into this unit
    ///
    /// # Examples
    /// ```
    /// use sortbench::util::units::TimeUnit;
    ///
    /// assert_eq!(TimeUnit::Millisecond.from_nanos(2_500_000.0), 2.5);
    /// assert_eq!(TimeUnit::Nanosecond.from_nanos(42.0), 42.0);
    /// ```
    pub fn from_nanos(&self, nanos: f64) -> f64 {
        nanos / self.factor()
    }

    /// Convert a value expressed in this unit back to nanoseconds
    pub fn to_nanos(&self, value: f64) -> f64 {
        value * self.factor()
    }

    /// The next larger unit, wrapping around to nanoseconds
    pub fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|u| u == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TimeUnit {
    type Err = String;

    /// Parse a unit from its name, plural or abbreviation
    ///
    /// # Examples
    /// ```
    /// use sortbench::util::units::TimeUnit;
    ///
    /// assert_eq!("ms".parse::<TimeUnit>().unwrap(), TimeUnit::Millisecond);
    /// assert_eq!("Seconds".parse::<TimeUnit>().unwrap(), TimeUnit::Second);
    /// ```
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_lowercase().as_str() {
            "ns" | "nanosecond" | "nanoseconds" => Ok(TimeUnit::Nanosecond),
            "us" | "µs" | "microsecond" | "microseconds" => Ok(TimeUnit::Microsecond),
            "ms" | "millisecond" | "milliseconds" => Ok(TimeUnit::Millisecond),
            "s" | "sec" | "second" | "seconds" => Ok(TimeUnit::Second),
            "min" | "minute" | "minutes" => Ok(TimeUnit::Minute),
            "h" | "hour" | "hours" => Ok(TimeUnit::Hour),
            other => Err(format!("Unknown time unit: {}", other)),
        }
    }
}

/// Format a canonical nanosecond value in the given unit
///
/// # Examples
/// ```
/// use sortbench::util::units::{format_time, TimeUnit};
///
/// assert_eq!(format_time(1_500_000.0, TimeUnit::Millisecond), "1.500");
/// assert_eq!(format_time(5000.0, TimeUnit::Nanosecond), "5000");
/// ```
pub fn format_time(nanos: f64, unit: TimeUnit) -> String {
    let value = unit.from_nanos(nanos);
    match unit {
        TimeUnit::Nanosecond => format!("{:.0}", value),
        _ => format!("{:.3}", value),
    }
}

/// Format an optional cell, rendering absent values as `-`
pub fn format_cell(cell: Option<f64>, unit: TimeUnit) -> String {
    match cell {
        Some(nanos) => format_time(nanos, unit),
        None => "-".to_string(),
    }
}
