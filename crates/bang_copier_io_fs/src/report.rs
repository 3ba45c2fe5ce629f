//! Run report model and mutable report builder.

use std::fmt;
use std::path::PathBuf;

/// One failed plan entry with destination path + error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRunError {
    /// Destination path of the failed copy.
    pub path: PathBuf,
    /// User-facing error text.
    pub exception: String,
}

/// Aggregate counters for one `execute_plan` run.
#[derive(Debug, Default, Clone)]
pub struct ReportRun {
    /// Number of copies successfully committed.
    pub cnt_copied: u64,
    /// Number of entries skipped because the destination existed.
    pub cnt_skipped: u64,
    /// Per-entry failures.
    pub errors: Vec<SpecRunError>,
}

impl ReportRun {
    /// Number of collected per-entry errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Whether any entry failed.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} copied={} skipped={} errors={}",
            self.cnt_copied,
            self.cnt_skipped,
            self.error_count()
        )
    }
}

impl fmt::Display for ReportRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[RUN]"))
    }
}

/// Mutable accumulator for run statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportRunBuilder {
    cnt_copied: u64,
    cnt_skipped: u64,
    errors: Vec<SpecRunError>,
}

impl ReportRunBuilder {
    /// Increment copied count by one.
    pub fn add_copied(&mut self) {
        self.cnt_copied += 1;
    }

    /// Increment skipped count by one.
    pub fn add_skipped(&mut self) {
        self.cnt_skipped += 1;
    }

    /// Add one path-scoped error.
    pub fn add_error(&mut self, path: PathBuf, exception: String) {
        self.errors.push(SpecRunError { path, exception });
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportRun {
        ReportRun {
            cnt_copied: self.cnt_copied,
            cnt_skipped: self.cnt_skipped,
            errors: self.errors,
        }
    }
}
