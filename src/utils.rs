//! Shared helpers

use std::path::{Path, PathBuf};

/// Sibling temporary path used for atomic writes: "name.ext" -> "name.ext.tmp".
/// The write targets the temporary name and is renamed into place on success,
/// so a failed operation never leaves a partial file under the final name.
pub(crate) fn temp_write_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
