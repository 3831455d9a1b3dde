//! Core data structures and types for sounding conversion.
//!
//! Defines the parsed sounding table, the launch header, the two supported
//! input layouts with their column descriptors, and the statistics reported
//! after a conversion run.

use crate::constants::{MISSING_VALUE_TOKEN, UAH_OUTPUT_SUFFIX, WYOMING_OUTPUT_SUFFIX};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// One row of the parsed sounding table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundingLevel {
    /// Pressure (mb)
    pub pressure_mb: f64,
    /// Height above mean sea level (m)
    pub height_m: f64,
    /// Temperature (C)
    pub temp_c: f64,
    /// Dewpoint (C); `None` until derived for layouts that only carry humidity
    pub dewpoint_c: Option<f64>,
    /// Relative humidity (%), read but never written out
    pub rel_humidity_pct: Option<f64>,
    /// Wind direction. In source units as read, compass degrees once normalized.
    pub wind_dir: f64,
    /// Wind speed (kt)
    pub wind_speed_kt: f64,
}

impl SoundingLevel {
    /// True if any field read from the input carries the missing-value sentinel
    pub fn has_sentinel(&self, sentinel: f64) -> bool {
        [
            Some(self.pressure_mb),
            Some(self.height_m),
            Some(self.temp_c),
            self.dewpoint_c,
            self.rel_humidity_pct,
            Some(self.wind_dir),
            Some(self.wind_speed_kt),
        ]
        .into_iter()
        .flatten()
        .any(|v| v == sentinel)
    }
}

/// Ordered sequence of levels in the order found in the source file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoundingTable {
    levels: Vec<SoundingLevel>,
}

impl SoundingTable {
    pub fn new(levels: Vec<SoundingLevel>) -> Self {
        Self { levels }
    }

    pub fn levels(&self) -> &[SoundingLevel] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn last(&self) -> Option<&SoundingLevel> {
        self.levels.last()
    }

    /// Build a new table by applying `f` to every level
    pub fn map_levels<F>(&self, f: F) -> Self
    where
        F: FnMut(&SoundingLevel) -> SoundingLevel,
    {
        Self {
            levels: self.levels.iter().map(f).collect(),
        }
    }
}

/// Station and launch time used for the output title and filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundingHeader {
    pub station_id: String,
    /// Launch date and time (UTC)
    pub launch: NaiveDateTime,
}

/// Field delimiter of an input table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// Runs of spaces or tabs
    Whitespace,
    Comma,
}

/// Units of the wind direction column in the source data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindDirUnits {
    Radians,
    Degrees,
}

/// Column index of each physical quantity in an input row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub pressure: usize,
    pub height: usize,
    pub temperature: usize,
    pub dewpoint: Option<usize>,
    pub rel_humidity: Option<usize>,
    pub wind_dir: usize,
    pub wind_speed: usize,
}

impl ColumnMap {
    /// Highest column index referenced by the map
    pub fn max_index(&self) -> usize {
        [
            Some(self.pressure),
            Some(self.height),
            Some(self.temperature),
            self.dewpoint,
            self.rel_humidity,
            Some(self.wind_dir),
            Some(self.wind_speed),
        ]
        .into_iter()
        .flatten()
        .max()
        .unwrap_or(0)
    }
}

/// Everything the reader needs to know about an input table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub delimiter: Delimiter,
    /// Number of leading lines to skip before data rows
    pub header_rows: usize,
    /// Token treated as a missing value
    pub missing_token: String,
    /// Minimum number of fields every data row must have
    pub min_columns: usize,
    pub columns: ColumnMap,
    pub wind_units: WindDirUnits,
}

/// Supported input layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputLayout {
    /// UAH iMet radiosonde instrument log: whitespace-delimited, no header,
    /// relative humidity instead of dewpoint, wind direction in radians
    UahImet,
    /// University of Wyoming archive export: comma-delimited with one header
    /// row, dewpoint supplied, wind direction in degrees
    Wyoming,
}

impl InputLayout {
    /// Column descriptor for this layout
    pub fn column_layout(&self) -> ColumnLayout {
        match self {
            InputLayout::UahImet => ColumnLayout {
                delimiter: Delimiter::Whitespace,
                header_rows: 0,
                missing_token: MISSING_VALUE_TOKEN.to_string(),
                min_columns: 9,
                columns: ColumnMap {
                    pressure: 3,
                    height: 4,
                    temperature: 0,
                    dewpoint: None,
                    rel_humidity: Some(2),
                    wind_dir: 7,
                    wind_speed: 8,
                },
                wind_units: WindDirUnits::Radians,
            },
            InputLayout::Wyoming => ColumnLayout {
                delimiter: Delimiter::Comma,
                header_rows: 1,
                missing_token: MISSING_VALUE_TOKEN.to_string(),
                min_columns: 8,
                columns: ColumnMap {
                    pressure: 0,
                    height: 1,
                    temperature: 2,
                    dewpoint: Some(3),
                    rel_humidity: Some(4),
                    wind_dir: 6,
                    wind_speed: 7,
                },
                wind_units: WindDirUnits::Degrees,
            },
        }
    }

    /// Whether dewpoint has to be derived from relative humidity
    pub fn derives_dewpoint(&self) -> bool {
        self.column_layout().columns.dewpoint.is_none()
    }

    /// Suffix appended to the date stamp to form the output filename
    pub fn output_suffix(&self) -> &'static str {
        match self {
            InputLayout::UahImet => UAH_OUTPUT_SUFFIX,
            InputLayout::Wyoming => WYOMING_OUTPUT_SUFFIX,
        }
    }
}

impl fmt::Display for InputLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputLayout::UahImet => write!(f, "UAH iMet log"),
            InputLayout::Wyoming => write!(f, "Wyoming archive export"),
        }
    }
}

/// Processing statistics
#[derive(Debug, Default, Clone, Serialize)]
pub struct ConversionStats {
    pub levels_read: usize,
    pub levels_written: usize,
    /// Levels dropped because they did not rise above the previous input row
    pub levels_non_ascending: usize,
    /// Input index at which the pressure ceiling stopped emission
    pub ceiling_index: Option<usize>,
    /// Levels carrying the missing-value sentinel in at least one field
    pub sentinel_levels: usize,
    /// Derived dewpoints that came out NaN or infinite
    pub non_finite_dewpoints: usize,
    /// Last input level did not reach the shallow-sounding advisory pressure
    pub shallow: bool,
    pub output_path: PathBuf,
    pub processing_time_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_max_index() {
        assert_eq!(InputLayout::UahImet.column_layout().columns.max_index(), 8);
        assert_eq!(InputLayout::Wyoming.column_layout().columns.max_index(), 7);
    }

    #[test]
    fn test_layout_min_columns_cover_map() {
        for layout in [InputLayout::UahImet, InputLayout::Wyoming] {
            let descriptor = layout.column_layout();
            assert!(descriptor.min_columns > descriptor.columns.max_index());
        }
    }

    #[test]
    fn test_derives_dewpoint() {
        assert!(InputLayout::UahImet.derives_dewpoint());
        assert!(!InputLayout::Wyoming.derives_dewpoint());
    }

    #[test]
    fn test_has_sentinel() {
        let mut level = SoundingLevel {
            pressure_mb: 950.0,
            height_m: 500.0,
            temp_c: 20.0,
            dewpoint_c: None,
            rel_humidity_pct: Some(50.0),
            wind_dir: 1.0,
            wind_speed_kt: 10.0,
        };
        assert!(!level.has_sentinel(-9999.0));

        level.rel_humidity_pct = Some(-9999.0);
        assert!(level.has_sentinel(-9999.0));
    }
}
