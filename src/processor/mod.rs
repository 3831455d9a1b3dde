//! Conversion pipeline for a single sounding file.
//!
//! Runs the four stages in order: read the input table, derive dewpoint
//! where the layout lacks it, normalize wind direction, then filter and
//! write the SHARPpy file.

pub mod derivation;
pub mod filter;
pub mod normalize;
pub mod reader;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::derivation::{count_non_finite_dewpoints, derive_dewpoints};
use self::filter::LevelFilter;
use self::normalize::normalize_wind;
use self::reader::read_table;
use self::writer::write_sounding;

use crate::config::{FilterPolicy, RunConfig};
use crate::constants::MISSING_VALUE_SENTINEL;
use crate::error::{Result, SoundingError};
use crate::models::{ConversionStats, SoundingTable};

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Converts one sounding file into SHARPpy format
#[derive(Debug)]
pub struct SoundingProcessor {
    config: RunConfig,
}

impl SoundingProcessor {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Read, derive, normalize and write; returns statistics for the run
    pub fn process(&self) -> Result<ConversionStats> {
        let start_time = Instant::now();
        let layout = self.config.layout.column_layout();

        info!(
            "Converting {} ({})",
            self.config.input_path.display(),
            self.config.layout
        );

        let table = read_table(&self.config.input_path, &layout)?;
        let shallow = self.check_depth(&table);

        let sentinel_levels = table
            .levels()
            .iter()
            .filter(|level| level.has_sentinel(MISSING_VALUE_SENTINEL))
            .count();
        if sentinel_levels > 0 {
            warn!(
                "{} levels contain missing values; they are written as {}",
                sentinel_levels, MISSING_VALUE_SENTINEL
            );
        }

        let (table, non_finite_dewpoints) = if self.config.layout.derives_dewpoint() {
            let derived = derive_dewpoints(&table);
            let non_finite = count_non_finite_dewpoints(&derived);
            if non_finite > 0 {
                warn!(
                    "{} derived dewpoints are not finite and will be written as nan/inf",
                    non_finite
                );
            }
            (derived, non_finite)
        } else {
            (table, 0)
        };

        let table = normalize_wind(&table, layout.wind_units);
        debug!("Normalized wind direction from {:?}", layout.wind_units);

        let output_path = self.config.output_path();
        let (levels_written, levels_non_ascending, ceiling_index) =
            self.write_output(&table, &output_path)?;

        let stats = ConversionStats {
            levels_read: table.len(),
            levels_written,
            levels_non_ascending,
            ceiling_index,
            sentinel_levels,
            non_finite_dewpoints,
            shallow,
            output_path,
            processing_time_ms: start_time.elapsed().as_millis(),
        };

        info!(
            "Wrote {} of {} levels to {}",
            stats.levels_written,
            stats.levels_read,
            stats.output_path.display()
        );

        Ok(stats)
    }

    /// Warn when the sounding stops below the depth SHARPpy needs to plot well
    fn check_depth(&self, table: &SoundingTable) -> bool {
        let policy = &self.config.policy;
        if !is_shallow(table, policy) {
            return false;
        }

        let last_mb = table.last().map_or(f64::NAN, |last| last.pressure_mb);
        warn!(
            "Sounding did not reach {} mb (last level {} mb) and may not plot properly; \
             converting anyway",
            policy.shallow_warning_mb, last_mb
        );
        true
    }

    /// Filter levels and stream them into the output file
    fn write_output(
        &self,
        table: &SoundingTable,
        output_path: &Path,
    ) -> Result<(usize, usize, Option<usize>)> {
        let output_failed = |source: std::io::Error| SoundingError::OutputFailed {
            path: output_path.to_path_buf(),
            source,
        };

        let file = File::create(output_path).map_err(output_failed)?;
        let mut filter = LevelFilter::new(table.levels(), self.config.policy);
        let written = write_sounding(BufWriter::new(file), &self.config.header, filter.by_ref())
            .map_err(output_failed)?;

        Ok((written, filter.non_ascending(), filter.ceiling_index()))
    }
}

/// True when the last input level has pressure at or above the advisory value.
/// An empty table is never shallow.
pub fn is_shallow(table: &SoundingTable, policy: &FilterPolicy) -> bool {
    table
        .last()
        .is_some_and(|last| last.pressure_mb >= policy.shallow_warning_mb)
}
