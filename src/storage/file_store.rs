//! File store
//!
//! Existence, size, deletion, listing, and upload saves, scoped to one
//! validated base directory. Probe operations report rejected names as
//! absent, so a caller cannot distinguish a boundary violation from a
//! missing file.

use crate::convert::ExtensionClass;
use crate::error::{StorageError, ValidationError};
use crate::utils::temp_write_path;
use crate::validation::{Filename, PathValidator, sanitize_filename};
use log::{debug, error, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Thin file operations over one base directory
pub struct FileStore {
    validator: PathValidator,
    max_file_size: u64,
}

impl FileStore {
    /// Build a store rooted at `base`. The directory must exist.
    pub fn new(base: &Path, max_file_size: u64) -> Result<Self, ValidationError> {
        Ok(Self {
            validator: PathValidator::new(base)?,
            max_file_size,
        })
    }

    /// The canonical base directory
    pub fn base(&self) -> &Path {
        self.validator.base()
    }

    /// Check whether a file exists. Rejected names report as absent.
    pub fn exists(&self, filename: &str) -> bool {
        match self.admit(filename) {
            Some(path) => path.is_file(),
            None => false,
        }
    }

    /// File size in bytes, or None when missing or not admissible
    pub fn size(&self, filename: &str) -> Option<u64> {
        let path = self.admit(filename)?;
        let metadata = fs::metadata(&path).ok()?;
        metadata.is_file().then(|| metadata.len())
    }

    /// Delete a file. Returns false when missing or not admissible.
    pub fn delete(&self, filename: &str) -> bool {
        let Some(path) = self.admit(filename) else {
            return false;
        };

        if !path.is_file() {
            return false;
        }

        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Deleted {}", filename);
                true
            }
            Err(e) => {
                error!("Failed to delete {}: {}", filename, e);
                false
            }
        }
    }

    /// List the files in the base directory, sorted. The layout is flat:
    /// subdirectories are never created and never listed.
    pub fn list(&self) -> Vec<String> {
        let entries = match fs::read_dir(self.base()) {
            Ok(entries) => entries,
            Err(e) => {
                error!("Failed to list {}: {}", self.base().display(), e);
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .flatten()
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Save uploaded content under a sanitized name, atomically.
    ///
    /// Only recognized file types are accepted, and content larger than
    /// the configured limit is refused before anything touches disk.
    pub fn store(&self, raw_filename: &str, content: &[u8]) -> Result<Filename, StorageError> {
        let filename = sanitize_filename(raw_filename)
            .map_err(|e| StorageError::InvalidFilename(e.to_string()))?;

        let ext = filename.extension().unwrap_or("");
        if ExtensionClass::from_extension(ext).is_none() {
            return Err(StorageError::UnsupportedFileType(ext.to_string()));
        }

        if content.len() as u64 > self.max_file_size {
            return Err(StorageError::FileTooLarge {
                size: content.len() as u64,
                limit: self.max_file_size,
            });
        }

        let path = self
            .validator
            .resolve(&filename)
            .map_err(|e| StorageError::AccessDenied(e.to_string()))?;

        let temp_path = temp_write_path(&path);
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StorageError::from(e)
        })?;

        info!("Stored {} ({} bytes)", filename, content.len());
        Ok(filename)
    }

    /// Both gates, with the outcome collapsed for probe operations.
    /// Rejections are logged at debug level only.
    fn admit(&self, raw_filename: &str) -> Option<PathBuf> {
        let filename = match sanitize_filename(raw_filename) {
            Ok(filename) => filename,
            Err(e) => {
                debug!("Rejected filename {:?}: {}", raw_filename, e);
                return None;
            }
        };

        match self.validator.resolve(&filename) {
            Ok(path) => Some(path),
            Err(e) => {
                debug!("Rejected path for {:?}: {}", raw_filename, e);
                None
            }
        }
    }
}
