//! Filename sanitization
//!
//! Normalizes a raw, untrusted filename into a safe token before it is
//! allowed anywhere near a path join. Pure string checks, no I/O.

use crate::error::ValidationError;
use std::fmt;

/// Longest accepted filename, matching the common filesystem name limit
pub const MAX_FILENAME_LENGTH: usize = 255;

/// A sanitized file name: a single path segment with allow-listed
/// characters only. Can only be obtained through [`sanitize_filename`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filename(String);

impl Filename {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extension (text after the last dot), if any. Dotfile-style names
    /// with only a leading dot report no extension.
    pub fn extension(&self) -> Option<&str> {
        match self.0.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
            _ => None,
        }
    }

    /// Derive a sibling name with the extension replaced (or appended)
    pub fn with_extension(&self, ext: &str) -> Filename {
        match self.0.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => Filename(format!("{}.{}", stem, ext)),
            _ => Filename(format!("{}.{}", self.0, ext)),
        }
    }

    /// Bypass sanitization. Only for tests that need a hostile value to
    /// prove the second gate holds on its own.
    #[cfg(test)]
    pub(crate) fn from_raw_unchecked(raw: &str) -> Filename {
        Filename(raw.to_string())
    }
}

impl fmt::Display for Filename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Filename {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Sanitize a raw filename.
///
/// Traversal segments and absolute paths are rejected outright, before
/// any directory component is stripped, so a hostile input can never be
/// laundered into an admissible name. Relative directory prefixes (as
/// some clients submit) are dropped, keeping only the final segment.
pub fn sanitize_filename(raw: &str) -> Result<Filename, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::EmptyFilename);
    }

    if raw.len() > MAX_FILENAME_LENGTH {
        return Err(ValidationError::FilenameTooLong(raw.len()));
    }

    if raw.chars().any(|c| c.is_control()) {
        return Err(ValidationError::ControlCharacter);
    }

    if raw.contains("..") {
        return Err(ValidationError::Traversal(raw.to_string()));
    }

    if is_absolute(raw) {
        return Err(ValidationError::AbsolutePath(raw.to_string()));
    }

    // Keep only the final path segment
    let name = raw.rsplit(['/', '\\']).next().unwrap_or(raw);

    if name.is_empty() {
        return Err(ValidationError::EmptyFilename);
    }

    if name.chars().all(|c| c == '.') {
        return Err(ValidationError::DotsOnly(name.to_string()));
    }

    // Double-extension policy: more than two dot-separated parts is
    // rejected, which also rules out compound extensions like .tar.gz
    if name.split('.').count() > 2 {
        return Err(ValidationError::DoubleExtension(name.to_string()));
    }

    if let Some(c) = name.chars().find(|c| !is_allowed_char(*c)) {
        return Err(ValidationError::DisallowedCharacter(c));
    }

    Ok(Filename(name.to_string()))
}

fn is_absolute(raw: &str) -> bool {
    raw.starts_with('/') || raw.starts_with('\\') || has_drive_prefix(raw)
}

fn has_drive_prefix(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}
