//! Conversion result types
//!
//! Defines result structures returned by the dispatcher.

use crate::validation::Filename;
use std::path::PathBuf;

/// Result of a successful conversion
#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub output_filename: Filename,
    pub output_path: PathBuf,
}
