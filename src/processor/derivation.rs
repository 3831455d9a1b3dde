//! Dewpoint derivation from relative humidity.
//!
//! Uses a Bolton-style saturation vapour pressure approximation. Values are
//! not range-checked: a non-positive vapour pressure or a saturation pressure
//! above the ambient pressure yields NaN or infinity, which is passed through
//! and counted by the caller.

use crate::constants::bolton::{
    EPSILON, EPSILON_SATURATION, ES0_PA, INVERSE_A, INVERSE_B, INVERSE_C, KELVIN_OFFSET,
    MAGNUS_A, MAGNUS_B_K,
};
use crate::models::SoundingTable;
use tracing::debug;

/// Saturation vapour pressure (Pa) at `temp_c`
pub fn saturation_vapor_pressure(temp_c: f64) -> f64 {
    let tk = temp_c + KELVIN_OFFSET;
    ES0_PA * (MAGNUS_A * (tk - KELVIN_OFFSET) / (tk - MAGNUS_B_K)).exp()
}

/// Dewpoint (C) from temperature (C), relative humidity (%) and pressure (mb)
pub fn dewpoint_from_rh(temp_c: f64, rel_humidity_pct: f64, pressure_mb: f64) -> f64 {
    let es = saturation_vapor_pressure(temp_c);
    let qvs = EPSILON_SATURATION * es / (pressure_mb * 100.0 - es);
    let qv = (rel_humidity_pct / 100.0) * qvs;
    let el = ((qv / EPSILON) * pressure_mb / (1.0 + qv / EPSILON)).ln();
    (INVERSE_A * el - INVERSE_B) / (INVERSE_C - el)
}

/// Return a new table with dewpoint derived for every level carrying humidity
///
/// Levels that already have a dewpoint or carry no humidity are copied as is.
pub fn derive_dewpoints(table: &SoundingTable) -> SoundingTable {
    let derived = table.map_levels(|level| {
        let mut level = *level;
        if level.dewpoint_c.is_none() {
            level.dewpoint_c = level
                .rel_humidity_pct
                .map(|rh| dewpoint_from_rh(level.temp_c, rh, level.pressure_mb));
        }
        level
    });

    debug!("Derived dewpoint for {} levels", derived.len());
    derived
}

/// Number of levels whose dewpoint is NaN or infinite
pub fn count_non_finite_dewpoints(table: &SoundingTable) -> usize {
    table
        .levels()
        .iter()
        .filter(|level| level.dewpoint_c.is_some_and(|td| !td.is_finite()))
        .count()
}
