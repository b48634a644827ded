//! Error types
//!
//! Defines domain-specific error types for each module of the conversion
//! service.

use std::fmt;
use std::io;
use std::time::Duration;

/// Filename and path validation errors
#[derive(Debug)]
pub enum ValidationError {
    EmptyFilename,
    FilenameTooLong(usize),
    ControlCharacter,
    Traversal(String),
    AbsolutePath(String),
    DotsOnly(String),
    DoubleExtension(String),
    DisallowedCharacter(char),
    NotAFilename(String),
    OutsideBase(String),
    BaseDirectory(io::Error),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyFilename => write!(f, "Empty filename"),
            ValidationError::FilenameTooLong(len) => {
                write!(f, "Filename too long: {} characters", len)
            }
            ValidationError::ControlCharacter => {
                write!(f, "Filename contains a control character")
            }
            ValidationError::Traversal(name) => {
                write!(f, "Filename contains a traversal segment: {}", name)
            }
            ValidationError::AbsolutePath(name) => {
                write!(f, "Filename is an absolute path: {}", name)
            }
            ValidationError::DotsOnly(name) => {
                write!(f, "Filename consists solely of dots: {}", name)
            }
            ValidationError::DoubleExtension(name) => {
                write!(f, "Filename has more than one extension: {}", name)
            }
            ValidationError::DisallowedCharacter(c) => {
                write!(f, "Filename contains disallowed character: {:?}", c)
            }
            ValidationError::NotAFilename(name) => {
                write!(f, "Not a single path component: {}", name)
            }
            ValidationError::OutsideBase(name) => {
                write!(f, "Path escapes the base directory: {}", name)
            }
            ValidationError::BaseDirectory(e) => {
                write!(f, "Base directory is not usable: {}", e)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Conversion pipeline errors
#[derive(Debug)]
pub enum ConvertError {
    UnsupportedFormat(String),
    InvalidFilename(String),
    AccessDenied(String),
    NotFound(String),
    UnsupportedConversion { input: String, output: String },
    Failed(String),
    Timeout(Duration),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::UnsupportedFormat(format) => {
                write!(f, "Unsupported output format: {}", format)
            }
            ConvertError::InvalidFilename(reason) => write!(f, "Invalid filename: {}", reason),
            ConvertError::AccessDenied(name) => write!(f, "Access denied: {}", name),
            ConvertError::NotFound(name) => write!(f, "Input file not found: {}", name),
            ConvertError::UnsupportedConversion { input, output } => {
                write!(f, "Unsupported conversion: {} to {}", input, output)
            }
            ConvertError::Failed(reason) => write!(f, "Conversion failed: {}", reason),
            ConvertError::Timeout(limit) => {
                write!(f, "Conversion timed out after {:?}", limit)
            }
        }
    }
}

impl std::error::Error for ConvertError {}

/// Errors raised inside a conversion routine
#[derive(Debug)]
pub enum RoutineError {
    Decode(String),
    Encode(String),
    IoError(io::Error),
}

impl fmt::Display for RoutineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutineError::Decode(reason) => write!(f, "Failed to decode input: {}", reason),
            RoutineError::Encode(reason) => write!(f, "Failed to encode output: {}", reason),
            RoutineError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for RoutineError {}

impl From<io::Error> for RoutineError {
    fn from(error: io::Error) -> Self {
        RoutineError::IoError(error)
    }
}

/// File store errors
#[derive(Debug)]
pub enum StorageError {
    InvalidFilename(String),
    AccessDenied(String),
    UnsupportedFileType(String),
    FileTooLarge { size: u64, limit: u64 },
    IoError(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::InvalidFilename(reason) => write!(f, "Invalid filename: {}", reason),
            StorageError::AccessDenied(reason) => write!(f, "Access denied: {}", reason),
            StorageError::UnsupportedFileType(ext) => {
                write!(f, "Unsupported file type: {:?}", ext)
            }
            StorageError::FileTooLarge { size, limit } => {
                write!(f, "File too large: {} bytes (limit {} bytes)", size, limit)
            }
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

/// General application error that encompasses all error types
#[derive(Debug)]
pub enum AppError {
    Validation(ValidationError),
    Convert(ConvertError),
    Storage(StorageError),
    Config(config::ConfigError),
    IoError(io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(e) => write!(f, "Validation error: {}", e),
            AppError::Convert(e) => write!(f, "Conversion error: {}", e),
            AppError::Storage(e) => write!(f, "Storage error: {}", e),
            AppError::Config(e) => write!(f, "Configuration error: {}", e),
            AppError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

// Implement conversions from specific errors to AppError
impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        AppError::Validation(error)
    }
}

impl From<ConvertError> for AppError {
    fn from(error: ConvertError) -> Self {
        AppError::Convert(error)
    }
}

impl From<StorageError> for AppError {
    fn from(error: StorageError) -> Self {
        AppError::Storage(error)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(error: config::ConfigError) -> Self {
        AppError::Config(error)
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        AppError::IoError(error)
    }
}
