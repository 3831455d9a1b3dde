//! SHARPpy Converter Library
//!
//! Converts atmospheric soundings from two instrument-specific text layouts
//! into the plain-text format read by the SHARPpy sounding analysis tool.
//!
//! This library provides tools for:
//! - Reading UAH iMet radiosonde logs and University of Wyoming CSV exports
//! - Deriving dewpoint from relative humidity where the layout lacks it
//! - Normalizing wind direction into compass degrees
//! - Dropping non-ascending levels and stopping at the 100 mb plot ceiling
//! - Writing the fixed `%TITLE%` / `%RAW%` / `%END%` record layout

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod header;
pub mod models;
pub mod processor;

// Re-export commonly used types
pub use config::{FilterPolicy, RunConfig};
pub use error::{Result, SoundingError};
pub use models::{ConversionStats, InputLayout, SoundingHeader, SoundingLevel, SoundingTable};
pub use processor::SoundingProcessor;
