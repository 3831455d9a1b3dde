//! Wind direction normalization into compass degrees.

use crate::models::{SoundingTable, WindDirUnits};

/// Map a single wind direction into compass degrees
///
/// Radians are converted to degrees and an exact 360 becomes 0. Degrees at or
/// above 360 are reduced by a single turn. Negative values are left alone in
/// both cases.
pub fn normalize_wind_dir(value: f64, units: WindDirUnits) -> f64 {
    match units {
        WindDirUnits::Radians => {
            let degrees = value.to_degrees();
            if degrees == 360.0 { 0.0 } else { degrees }
        }
        WindDirUnits::Degrees => {
            if value >= 360.0 {
                value - 360.0
            } else {
                value
            }
        }
    }
}

/// Return a new table with every wind direction in compass degrees
pub fn normalize_wind(table: &SoundingTable, units: WindDirUnits) -> SoundingTable {
    table.map_levels(|level| {
        let mut level = *level;
        level.wind_dir = normalize_wind_dir(level.wind_dir, units);
        level
    })
}
