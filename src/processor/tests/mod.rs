//! Pipeline tests for the processor module
//!
//! Exercise the complete conversion against fixture files written to a
//! temporary directory.

pub mod basic_processing;
