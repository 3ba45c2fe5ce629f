//! Run-log writers: pipe-delimited text, CSV and JSON.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use bang_copier_conf::{EnumLogFormat, SpecConfig};
use bang_copier_io_fs::SpecPlanEntry;
use chrono::{DateTime, Local};

use crate::spec::{
    C_FMT_RUN_ID, C_FMT_TIMESTAMP, C_PREFIX_LOG_FILE, LogWriteError, ReportLogs, SpecJsonLog,
    SpecLogRecord,
};

struct SpecRunContext<'a> {
    run_id: String,
    ts_run: DateTime<Local>,
    source_path: &'a Path,
    destinations: &'a [PathBuf],
}

/// Write every enabled log format for one executed plan.
///
/// A failing writer is reported in [`ReportLogs::errors`] and does not stop
/// the other writers.
pub fn write_logs(
    plan: &[SpecPlanEntry],
    config: &SpecConfig,
    log_dir: &Path,
    source_path: &Path,
) -> ReportLogs {
    write_logs_at(plan, config, log_dir, source_path, Local::now())
}

/// [`write_logs`] with an explicit run time.
pub fn write_logs_at(
    plan: &[SpecPlanEntry],
    config: &SpecConfig,
    log_dir: &Path,
    source_path: &Path,
    ts_run: DateTime<Local>,
) -> ReportLogs {
    let spec_ctx = SpecRunContext {
        run_id: ts_run.format(C_FMT_RUN_ID).to_string(),
        ts_run,
        source_path,
        destinations: &config.destinations,
    };
    let mut report_logs = ReportLogs {
        run_id: spec_ctx.run_id.clone(),
        ..Default::default()
    };

    for enum_fmt in EnumLogFormat::ALL {
        if !config.has_log_format(enum_fmt) {
            continue;
        }
        let path_file_log = derive_log_path(log_dir, &spec_ctx.run_id, enum_fmt);
        let res_write = match enum_fmt {
            EnumLogFormat::Log => write_text_log(&path_file_log, plan, &spec_ctx),
            EnumLogFormat::Csv => write_csv_log(&path_file_log, plan, &spec_ctx),
            EnumLogFormat::Json => write_json_log(&path_file_log, plan, &spec_ctx),
        };
        match res_write {
            Ok(()) => {
                tracing::info!(format = %enum_fmt, path = %path_file_log.display(), "run log written");
                report_logs.written.push((enum_fmt, path_file_log));
            }
            Err(e) => {
                tracing::warn!(format = %enum_fmt, "run log failed: {e}");
                report_logs.errors.push((enum_fmt, e.to_string()));
            }
        }
    }

    report_logs
}

/// `<log_dir>/bang_copier_<run_id>.<ext>`.
pub fn derive_log_path(log_dir: &Path, run_id: &str, enum_fmt: EnumLogFormat) -> PathBuf {
    log_dir.join(format!(
        "{C_PREFIX_LOG_FILE}_{run_id}.{}",
        enum_fmt.extension()
    ))
}

fn derive_records(plan: &[SpecPlanEntry], spec_ctx: &SpecRunContext<'_>) -> Vec<SpecLogRecord> {
    plan.iter()
        .map(|spec_entry| SpecLogRecord {
            run_id: spec_ctx.run_id.clone(),
            source: spec_ctx.source_path.display().to_string(),
            original_filename: spec_entry.original_filename(),
            new_filename: spec_entry.new_filename(),
            status: spec_entry.status.to_string(),
            destination: spec_entry.path_file_dst.display().to_string(),
            timestamp: format_entry_ts(spec_entry, spec_ctx),
            message: spec_entry.error.clone().unwrap_or_default(),
        })
        .collect()
}

fn format_entry_ts(spec_entry: &SpecPlanEntry, spec_ctx: &SpecRunContext<'_>) -> String {
    spec_entry
        .ts_done
        .unwrap_or(spec_ctx.ts_run)
        .format(C_FMT_TIMESTAMP)
        .to_string()
}

fn write_text_log(
    path_file_log: &Path,
    plan: &[SpecPlanEntry],
    spec_ctx: &SpecRunContext<'_>,
) -> Result<(), LogWriteError> {
    let map_io = |source| LogWriteError::Io {
        path: path_file_log.to_path_buf(),
        source,
    };
    let file = File::create(path_file_log).map_err(map_io)?;
    let mut writer = BufWriter::new(file);

    let mut txt_header = format!(
        "Bang File Copier run: {}\nSource: {}\nDestinations:\n",
        spec_ctx.ts_run.format(C_FMT_TIMESTAMP),
        spec_ctx.source_path.display()
    );
    for path_dir_dst in spec_ctx.destinations {
        txt_header.push_str(&format!("  - {}\n", path_dir_dst.display()));
    }
    txt_header.push_str("\nEntries:\n");
    txt_header.push_str(
        "timestamp | src | dest | original_filename | new_filename | status | message\n",
    );
    writer.write_all(txt_header.as_bytes()).map_err(map_io)?;

    for spec_entry in plan {
        writeln!(
            writer,
            "{} | {} | {} | {} | {} | {} | {}",
            format_entry_ts(spec_entry, spec_ctx),
            spec_entry.path_file_src.display(),
            spec_entry.path_file_dst.display(),
            spec_entry.original_filename(),
            spec_entry.new_filename(),
            spec_entry.status,
            spec_entry.error.as_deref().unwrap_or("")
        )
        .map_err(map_io)?;
    }
    writer.flush().map_err(map_io)
}

fn write_csv_log(
    path_file_log: &Path,
    plan: &[SpecPlanEntry],
    spec_ctx: &SpecRunContext<'_>,
) -> Result<(), LogWriteError> {
    let map_csv = |source| LogWriteError::Csv {
        path: path_file_log.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path_file_log).map_err(map_csv)?;
    let l_records = derive_records(plan, spec_ctx);
    if l_records.is_empty() {
        // `serialize` emits the header with the first record only.
        writer
            .write_record([
                "run_id",
                "source",
                "original_filename",
                "new_filename",
                "status",
                "destination",
                "timestamp",
                "message",
            ])
            .map_err(map_csv)?;
    }
    for spec_record in &l_records {
        writer.serialize(spec_record).map_err(map_csv)?;
    }
    writer.flush().map_err(|source| LogWriteError::Io {
        path: path_file_log.to_path_buf(),
        source,
    })
}

fn write_json_log(
    path_file_log: &Path,
    plan: &[SpecPlanEntry],
    spec_ctx: &SpecRunContext<'_>,
) -> Result<(), LogWriteError> {
    let map_io = |source| LogWriteError::Io {
        path: path_file_log.to_path_buf(),
        source,
    };
    let l_records = derive_records(plan, spec_ctx);
    let spec_json_log = SpecJsonLog {
        run_id: &spec_ctx.run_id,
        source: spec_ctx.source_path.display().to_string(),
        destinations: spec_ctx
            .destinations
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
        entries: &l_records,
    };

    let file = File::create(path_file_log).map_err(map_io)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &spec_json_log).map_err(|source| {
        LogWriteError::Json {
            path: path_file_log.to_path_buf(),
            source,
        }
    })?;
    writer.write_all(b"\n").map_err(map_io)?;
    writer.flush().map_err(map_io)
}
