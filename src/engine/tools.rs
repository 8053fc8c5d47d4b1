//! Name-matching and path helpers used by the matcher and transfer pools.

use std::path::{Path, PathBuf};

/// True when `name` contains `pattern` and ends with `extension`. Both
/// tests are literal and case-sensitive, on the full file name, so the
/// extension test also accepts a file named exactly `.log`.
pub fn file_name_matches(name: &str, pattern: &str, extension: &str) -> bool {
    name.contains(pattern) && name.ends_with(extension)
}

/// Destination path for a copied file: `dest/<base name of source>`.
/// `None` when `source` has no file name (e.g. ends in `..`).
pub fn dest_path_for(dest: &Path, source: &Path) -> Option<PathBuf> {
    source.file_name().map(|name| dest.join(name))
}
