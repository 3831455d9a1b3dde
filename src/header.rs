//! Sounding header construction and output naming.
//!
//! Builds the station/launch header either from explicit `YYMMDD` / `HHMM`
//! parameters or from the `YYYY-MM-DD_HHMM` file-name convention of Wyoming
//! exports, and synthesizes the SHARPpy output filename and title line.

use crate::constants::{
    DEFAULT_STATION_ID, LAUNCH_DATE_FORMAT, LAUNCH_TIME_FORMAT, WYOMING_FILENAME_PATTERN,
};
use crate::error::{Result, SoundingError};
use crate::models::{InputLayout, SoundingHeader};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::path::Path;
use tracing::{debug, warn};

impl SoundingHeader {
    /// Build a header from explicit launch parameters
    ///
    /// `date` is `YYMMDD` and `time` is `HHMM` (UTC). A missing station ID
    /// falls back to the default with a warning.
    pub fn from_parameters(station_id: Option<&str>, date: &str, time: &str) -> Result<Self> {
        Ok(Self {
            station_id: resolve_station_id(station_id),
            launch: parse_launch(date, time)?,
        })
    }

    /// Build a header from a Wyoming export file name
    pub fn from_filename(station_id: Option<&str>, path: &Path) -> Result<Self> {
        Ok(Self {
            station_id: resolve_station_id(station_id),
            launch: launch_from_filename(path)?,
        })
    }

    /// Two-digit year, month and day, e.g. `160324`
    pub fn date_stamp(&self) -> String {
        self.launch.format(LAUNCH_DATE_FORMAT).to_string()
    }

    /// Four-digit launch time, e.g. `1515`
    pub fn time_stamp(&self) -> String {
        self.launch.format(LAUNCH_TIME_FORMAT).to_string()
    }

    /// Title line of the SHARPpy file: `{station} {YYMMDD}/{HHMM}`
    pub fn title_line(&self) -> String {
        format!(
            "{} {}/{}",
            self.station_id,
            self.date_stamp(),
            self.time_stamp()
        )
    }
}

/// Use the supplied station ID, or the default one with a warning
pub fn resolve_station_id(station_id: Option<&str>) -> String {
    match station_id.map(str::trim).filter(|s| !s.is_empty()) {
        Some(id) => id.to_string(),
        None => {
            warn!(
                "Station ID not supplied, using default {}",
                DEFAULT_STATION_ID
            );
            DEFAULT_STATION_ID.to_string()
        }
    }
}

/// Parse `YYMMDD` and `HHMM` into a launch timestamp
pub fn parse_launch(date: &str, time: &str) -> Result<NaiveDateTime> {
    if date.len() != 6 || !date.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SoundingError::invalid_header(format!(
            "launch date '{}' is not in YYMMDD form",
            date
        )));
    }
    if time.len() != 4 || !time.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SoundingError::invalid_header(format!(
            "launch time '{}' is not in HHMM form",
            time
        )));
    }

    let date = NaiveDate::parse_from_str(date, LAUNCH_DATE_FORMAT).map_err(|e| {
        SoundingError::invalid_header(format!("invalid launch date '{}': {}", date, e))
    })?;
    let time = NaiveTime::parse_from_str(time, LAUNCH_TIME_FORMAT).map_err(|e| {
        SoundingError::invalid_header(format!("invalid launch time '{}': {}", time, e))
    })?;

    Ok(date.and_time(time))
}

/// Extract the launch timestamp from a `YYYY-MM-DD_HHMM...` file name
///
/// Only the final path component is inspected.
pub fn launch_from_filename(path: &Path) -> Result<NaiveDateTime> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            SoundingError::invalid_header(format!("no usable file name in '{}'", path.display()))
        })?;

    let pattern = Regex::new(WYOMING_FILENAME_PATTERN)
        .map_err(|e| SoundingError::invalid_header(format!("bad file-name pattern: {}", e)))?;

    let captures = pattern.captures(file_name).ok_or_else(|| {
        SoundingError::invalid_header(format!(
            "file name '{}' does not follow the YYYY-MM-DD_HHMM convention",
            file_name
        ))
    })?;

    let date = format!("{}{}{}", &captures[1], &captures[2], &captures[3]);
    let time = &captures[4];
    debug!(
        "Launch metadata from file name {}: date={}, time={}",
        file_name, date, time
    );

    parse_launch(&date, time)
}

/// Output filename: `{YYMMDD}{HHMM}` followed by the layout suffix
pub fn output_file_name(header: &SoundingHeader, layout: InputLayout) -> String {
    format!(
        "{}{}{}",
        header.date_stamp(),
        header.time_stamp(),
        layout.output_suffix()
    )
}
