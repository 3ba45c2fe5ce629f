//! Plan models and top-level error types.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Planned action for one (file, destination) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumPlanAction {
    /// Destination file is absent; copy the source.
    Copy,
    /// Destination file exists; leave it untouched.
    SkipAlreadyExists,
}

impl EnumPlanAction {
    /// Stable upper-case label used in logs and output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Copy => "COPY",
            Self::SkipAlreadyExists => "SKIP_ALREADY_EXISTS",
        }
    }
}

impl fmt::Display for EnumPlanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one plan entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumPlanStatus {
    /// Not executed yet (or dry run).
    Pending,
    /// Copy committed.
    Success,
    /// Copy attempted and failed.
    Error,
    /// Destination already existed; nothing done.
    SkippedAlreadyExists,
}

impl EnumPlanStatus {
    /// Stable label used in logs and output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "SUCCESS",
            Self::Error => "ERROR",
            Self::SkippedAlreadyExists => "SKIPPED_ALREADY_EXISTS",
        }
    }
}

impl fmt::Display for EnumPlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Structs

/// Destination name derived for one matched file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRenameEntry {
    /// Matched source file.
    pub path_file_src: PathBuf,
    /// Source basename with the leading `!` markers stripped.
    pub clean_basename: OsString,
    /// `"<source folder name> <clean_basename>"`.
    pub new_filename: OsString,
}

/// One proposed (or executed) copy/skip for a single (file, destination) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecPlanEntry {
    /// Matched source file.
    pub path_file_src: PathBuf,
    /// Resolved destination directory.
    pub path_dir_dst: PathBuf,
    /// `path_dir_dst / new_filename`.
    pub path_file_dst: PathBuf,
    /// Decision taken at planning time.
    pub action: EnumPlanAction,
    /// Outcome, updated by the executor.
    pub status: EnumPlanStatus,
    /// Failure text when `status == Error`.
    pub error: Option<String>,
    /// Local time at which the outcome was recorded.
    pub ts_done: Option<DateTime<Local>>,
}

impl SpecPlanEntry {
    /// Source basename as it appears in the source directory.
    pub fn original_filename(&self) -> String {
        self.path_file_src
            .file_name()
            .map(|v| v.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Destination basename.
    pub fn new_filename(&self) -> String {
        self.path_file_dst
            .file_name()
            .map(|v| v.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    pub(crate) fn mark(&mut self, status: EnumPlanStatus, error: Option<String>) {
        self.status = status;
        self.error = error;
        self.ts_done = Some(Local::now());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Source scanning failures. Fatal to the run.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Source path is missing or not a directory.
    #[error("Source folder does not exist or is not a directory: {}", .0.display())]
    SourceNotDirectory(PathBuf),
    /// Directory listing failed.
    #[error("Failed to read source directory {}: {source}", path.display())]
    SourceReadFailed {
        /// Source directory.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Per-entry copy failure. Recorded on the plan entry, never fatal.
#[derive(Debug, Error)]
pub enum CopyError {
    /// Filesystem operation failed.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// External copy tool could not be started.
    #[error("Failed to run `{program}`: {source}")]
    CommandSpawnFailed {
        /// Tool name.
        program: &'static str,
        /// Spawn error.
        #[source]
        source: std::io::Error,
    },
    /// External copy tool exited nonzero.
    #[error("`{program}` exited with {status}: {stderr}")]
    CommandFailed {
        /// Tool name.
        program: &'static str,
        /// Exit status text.
        status: String,
        /// Captured stderr, trimmed.
        stderr: String,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
