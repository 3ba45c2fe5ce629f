//! Top-level marker-file scanning.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::bytes::Regex;

use crate::spec::ScanError;

/// Marker character prefixed to eligible file names.
pub const C_MARKER: char = '!';

// 1..3 markers, then a non-marker byte. Matched on raw name bytes so
// non-UTF-8 names still qualify.
static RE_MARKER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!{1,3}(?-u:[^!])").expect("marker regex is valid"));

/// Whether `name` starts with exactly 1, 2 or 3 `!` followed by a non-`!`.
pub fn is_marker_name<S: AsRef<OsStr>>(name: S) -> bool {
    RE_MARKER_NAME.is_match(name.as_ref().as_encoded_bytes())
}

/// List regular files directly under `dir_source` whose names carry the marker.
///
/// No recursion. Order follows the directory listing and is not sorted.
pub fn scan_marker_files<P: AsRef<Path>>(dir_source: P) -> Result<Vec<PathBuf>, ScanError> {
    let path_dir_src = dir_source.as_ref();
    if !path_dir_src.is_dir() {
        return Err(ScanError::SourceNotDirectory(path_dir_src.to_path_buf()));
    }

    let iter_entries = fs::read_dir(path_dir_src).map_err(|source| ScanError::SourceReadFailed {
        path: path_dir_src.to_path_buf(),
        source,
    })?;

    let mut l_files = Vec::new();
    for entry_res in iter_entries {
        let entry = entry_res.map_err(|source| ScanError::SourceReadFailed {
            path: path_dir_src.to_path_buf(),
            source,
        })?;
        let path_entry = entry.path();

        // Follows symlinks, like a plain `is_file` check.
        if !path_entry.is_file() {
            continue;
        }
        if is_marker_name(entry.file_name()) {
            tracing::debug!(path = %path_entry.display(), "marker file matched");
            l_files.push(path_entry);
        }
    }

    Ok(l_files)
}
