//! Run configuration.
//!
//! A `RunConfig` is built once from validated command-line input and passed
//! by reference through the pipeline; nothing mutates it afterwards.

use crate::constants::{PRESSURE_CEILING_MB, SHALLOW_SOUNDING_MB};
use crate::header::output_file_name;
use crate::models::{InputLayout, SoundingHeader};
use std::path::PathBuf;

/// Level filtering thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterPolicy {
    /// Emission stops at the first level with pressure at or below this value (mb)
    pub pressure_ceiling_mb: f64,

    /// Warn when the last input level has pressure at or above this value (mb)
    pub shallow_warning_mb: f64,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            pressure_ceiling_mb: PRESSURE_CEILING_MB,
            shallow_warning_mb: SHALLOW_SOUNDING_MB,
        }
    }
}

/// Complete description of one conversion run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Sounding file to convert
    pub input_path: PathBuf,

    /// Layout of the input file
    pub layout: InputLayout,

    /// Station and launch time for the title line and output name
    pub header: SoundingHeader,

    /// Directory the output file is written into
    pub output_dir: PathBuf,

    pub policy: FilterPolicy,
}

impl RunConfig {
    /// Create a configuration writing into the current working directory
    pub fn new(
        input_path: impl Into<PathBuf>,
        layout: InputLayout,
        header: SoundingHeader,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            layout,
            header,
            output_dir: PathBuf::from("."),
            policy: FilterPolicy::default(),
        }
    }

    /// Write the output file into `output_dir`
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Full path of the SHARPpy file this run produces
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(output_file_name(&self.header, self.layout))
    }
}
