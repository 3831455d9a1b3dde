//! Error handling for sounding conversion.
//!
//! Provides error types with context for argument validation, input table
//! parsing and output file failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SoundingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Required argument not supplied: {name}")]
    MissingArgument { name: String },

    #[error("Input file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid input format in file: {path} (line {line}) - {reason}")]
    InputFormat {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Invalid sounding header: {reason}")]
    InvalidHeader { reason: String },

    #[error("Failed to write output file: {path}")]
    OutputFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SoundingError {
    pub fn missing_argument(name: impl Into<String>) -> Self {
        Self::MissingArgument { name: name.into() }
    }

    pub fn input_format(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        Self::InputFormat {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }

    pub fn invalid_header(reason: impl Into<String>) -> Self {
        Self::InvalidHeader {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SoundingError>;
