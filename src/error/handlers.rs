//! Error handlers
//!
//! Maps errors to the HTTP-style status codes a serving layer should use.
//! The mapping never exposes resolved filesystem paths; boundary
//! violations and missing files stay distinguishable here so callers can
//! pick status codes, not error text.

use crate::error::types::{AppError, ConvertError, StorageError};
use log::error;

/// Handle an application error
pub fn handle_error(err: &AppError) {
    error!("Application error: {}", err);
}

/// Convert an application error to an HTTP-style status code
pub fn error_to_status_code(err: &AppError) -> u16 {
    match err {
        AppError::Validation(_) => 400,
        AppError::Convert(e) => convert_error_to_status_code(e),
        AppError::Storage(e) => storage_error_to_status_code(e),
        AppError::Config(_) => 500,
        AppError::IoError(_) => 500,
    }
}

/// Convert a conversion-pipeline error to an HTTP-style status code
pub fn convert_error_to_status_code(err: &ConvertError) -> u16 {
    match err {
        ConvertError::UnsupportedFormat(_) => 400,
        ConvertError::InvalidFilename(_) => 400,
        ConvertError::UnsupportedConversion { .. } => 400,
        ConvertError::AccessDenied(_) => 403,
        ConvertError::NotFound(_) => 404,
        ConvertError::Failed(_) => 500,
        ConvertError::Timeout(_) => 500,
    }
}

/// Convert a file-store error to an HTTP-style status code
pub fn storage_error_to_status_code(err: &StorageError) -> u16 {
    match err {
        StorageError::InvalidFilename(_) => 400,
        StorageError::UnsupportedFileType(_) => 400,
        StorageError::AccessDenied(_) => 403,
        StorageError::FileTooLarge { .. } => 413,
        StorageError::IoError(_) => 500,
    }
}
