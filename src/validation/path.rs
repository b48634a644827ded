//! Path containment
//!
//! Resolves sanitized filenames against a fixed base directory and
//! decides admission. This is the second gate: it does not trust the
//! sanitizer and re-checks the name on its own.

use crate::error::ValidationError;
use crate::validation::Filename;
use log::warn;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Resolves filenames inside one canonical base directory.
///
/// The base is canonicalized once at construction (absolute, symlinks
/// resolved) and never changes afterwards.
#[derive(Debug, Clone)]
pub struct PathValidator {
    canonical_base: PathBuf,
}

impl PathValidator {
    /// Create a validator rooted at `base`. The directory must exist.
    pub fn new(base: &Path) -> Result<Self, ValidationError> {
        let canonical_base = fs::canonicalize(base).map_err(ValidationError::BaseDirectory)?;
        Ok(Self { canonical_base })
    }

    /// The canonical base directory
    pub fn base(&self) -> &Path {
        &self.canonical_base
    }

    /// Resolve `filename` inside the base directory.
    ///
    /// Accepts only if the canonicalized join is a strict descendant of
    /// the canonical base. The comparison is path-segment aligned, so a
    /// sibling like `/data2` is never admitted as being inside `/data`.
    /// Does not check existence; a missing file resolves to the join of
    /// the canonical base and the (single-component) name.
    pub fn resolve(&self, filename: &Filename) -> Result<PathBuf, ValidationError> {
        // Independent re-check: a sanitized name must be exactly one
        // normal path component.
        let mut components = Path::new(filename.as_str()).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => {
                warn!("Rejected non-filename component: {}", filename);
                return Err(ValidationError::NotAFilename(filename.to_string()));
            }
        }

        let joined = self.canonical_base.join(filename.as_str());

        // Canonicalize when the target exists so a planted symlink cannot
        // smuggle the path outside the base. A missing target keeps the
        // joined path, whose parent is already canonical.
        let resolved = match joined.canonicalize() {
            Ok(path) => path,
            Err(_) => joined,
        };

        if resolved.starts_with(&self.canonical_base) && resolved != self.canonical_base {
            Ok(resolved)
        } else {
            warn!("Rejected path outside base directory: {}", filename);
            Err(ValidationError::OutsideBase(filename.to_string()))
        }
    }
}
