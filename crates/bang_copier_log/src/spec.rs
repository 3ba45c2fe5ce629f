//! Run-log record models, write report and errors.

use std::path::{Path, PathBuf};

use bang_copier_conf::EnumLogFormat;
use serde::Serialize;
use thiserror::Error;

/// Run-log file name prefix.
pub const C_PREFIX_LOG_FILE: &str = "bang_copier";
/// `strftime` layout of the run identifier.
pub const C_FMT_RUN_ID: &str = "%Y-%m-%d_%H-%M-%S";
/// `strftime` layout of per-entry ISO-8601 timestamps.
pub const C_FMT_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// One plan entry as written to CSV and JSON logs. Field order is the CSV
/// column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecLogRecord {
    /// Run identifier (`YYYY-MM-DD_HH-MM-SS`).
    pub run_id: String,
    /// Source directory.
    pub source: String,
    /// Basename in the source directory.
    pub original_filename: String,
    /// Basename at the destination.
    pub new_filename: String,
    /// Entry status label.
    pub status: String,
    /// Full destination path.
    pub destination: String,
    /// ISO-8601 local timestamp.
    pub timestamp: String,
    /// Error text, empty when none.
    pub message: String,
}

/// Whole-run JSON log document.
#[derive(Debug, Clone, Serialize)]
pub struct SpecJsonLog<'a> {
    /// Run identifier.
    pub run_id: &'a str,
    /// Source directory.
    pub source: String,
    /// Resolved destinations.
    pub destinations: Vec<String>,
    /// One record per plan entry.
    pub entries: &'a [SpecLogRecord],
}

/// Which log files were written and which writers failed.
#[derive(Debug, Clone, Default)]
pub struct ReportLogs {
    /// Run identifier used in file names.
    pub run_id: String,
    /// Successfully written files.
    pub written: Vec<(EnumLogFormat, PathBuf)>,
    /// Writer failures, one per failed format.
    pub errors: Vec<(EnumLogFormat, String)>,
}

impl ReportLogs {
    /// Path of the `log`-format file, if it was written.
    pub fn path_log(&self) -> Option<&Path> {
        self.written
            .iter()
            .find(|(enum_fmt, _)| *enum_fmt == EnumLogFormat::Log)
            .map(|(_, path)| path.as_path())
    }
}

/// Failure of one log writer.
#[derive(Debug, Error)]
pub enum LogWriteError {
    /// File create/write failed.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// Target file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// CSV serialization failed.
    #[error("Failed to write CSV {}: {source}", path.display())]
    Csv {
        /// Target file.
        path: PathBuf,
        /// CSV error.
        #[source]
        source: csv::Error,
    },
    /// JSON serialization failed.
    #[error("Failed to write JSON {}: {source}", path.display())]
    Json {
        /// Target file.
        path: PathBuf,
        /// JSON error.
        #[source]
        source: serde_json::Error,
    },
}
