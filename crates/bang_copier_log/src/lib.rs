//! `bang_copier_log` v1:
//! Run-log writers and diagnostic tracing setup.
//!
//! - `spec`   : record models, write report, errors
//! - `writer` : `log` / `csv` / `json` run-log writers
//! - `trace`  : stderr tracing subscriber

pub mod spec;
pub mod trace;
pub mod writer;

pub use spec::{
    C_FMT_RUN_ID, C_FMT_TIMESTAMP, C_PREFIX_LOG_FILE, LogWriteError, ReportLogs, SpecJsonLog,
    SpecLogRecord,
};
pub use trace::{SpecTraceOptions, init_tracing};
pub use writer::{derive_log_path, write_logs, write_logs_at};
