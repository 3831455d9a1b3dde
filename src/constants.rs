//! Application constants for the SHARPpy converter
//!
//! This module contains the fixed values shared across the conversion
//! pipeline: input tokens, default station metadata, filtering thresholds,
//! the dewpoint approximation coefficients, and the output record markers.

// =============================================================================
// Input Parsing
// =============================================================================

/// Literal token the instrument logs and archive exports use for a missing value
pub const MISSING_VALUE_TOKEN: &str = "-----";

/// Sentinel substituted for missing values (and empty CSV fields)
pub const MISSING_VALUE_SENTINEL: f64 = -9999.0;

/// Lines starting with this character are skipped by the reader
pub const COMMENT_PREFIX: char = '#';

// =============================================================================
// Station and Launch Metadata
// =============================================================================

/// Station identifier used when none is supplied on the command line
pub const DEFAULT_STATION_ID: &str = "MSU";

/// Launch date format accepted on the command line (YYMMDD)
pub const LAUNCH_DATE_FORMAT: &str = "%y%m%d";

/// Launch time format accepted on the command line (HHMM, UTC)
pub const LAUNCH_TIME_FORMAT: &str = "%H%M";

/// File-name convention of Wyoming exports: `YYYY-MM-DD_HHMM...`
///
/// Captures the two-digit year, month, day and the four-digit launch time.
pub const WYOMING_FILENAME_PATTERN: &str = r"^\d{2}(\d{2})-(\d{2})-(\d{2})_(\d{4})";

// =============================================================================
// Level Filtering
// =============================================================================

/// Top of the SHARPpy plot; emission stops at the first level at or above it (mb)
pub const PRESSURE_CEILING_MB: f64 = 100.0;

/// Soundings whose last level is at or below this pressure may not plot properly (mb)
pub const SHALLOW_SOUNDING_MB: f64 = 400.0;

// =============================================================================
// Dewpoint Derivation
// =============================================================================

/// Coefficients of the Bolton-style saturation vapour pressure approximation
pub mod bolton {
    /// Offset between Celsius and Kelvin
    pub const KELVIN_OFFSET: f64 = 273.15;

    /// Saturation vapour pressure at 0 C (Pa)
    pub const ES0_PA: f64 = 611.2;

    /// Magnus numerator coefficient
    pub const MAGNUS_A: f64 = 17.67;

    /// Magnus denominator offset (K)
    pub const MAGNUS_B_K: f64 = 29.65;

    /// Ratio of gas constants used for the saturation mixing ratio
    pub const EPSILON_SATURATION: f64 = 0.6219718;

    /// Ratio of gas constants used when inverting the mixing ratio
    pub const EPSILON: f64 = 0.622;

    /// Inverse Magnus coefficients: `(A * ln(e) - B) / (C - ln(e))`
    pub const INVERSE_A: f64 = 243.5;
    pub const INVERSE_B: f64 = 440.8;
    pub const INVERSE_C: f64 = 19.48;
}

// =============================================================================
// SHARPpy Output
// =============================================================================

/// Output record markers and column header
pub mod sharppy {
    pub const TITLE_MARKER: &str = "%TITLE%";
    pub const COLUMN_HEADER: &str = "LEVEL  HGHT  TEMP  DWPT WDIR  WSPD";
    pub const COLUMN_RULE: &str = "----------------------------------";
    pub const RAW_MARKER: &str = "%RAW%";
    pub const END_MARKER: &str = "%END%";

    /// Separator between the six fields of a data line
    pub const FIELD_SEPARATOR: &str = ", ";
}

/// Output filename suffix for UAH iMet instrument logs
pub const UAH_OUTPUT_SUFFIX: &str = "_UAH_SHARPpy";

/// Output filename suffix for Wyoming archive exports
pub const WYOMING_OUTPUT_SUFFIX: &str = "_SHARPpy";
