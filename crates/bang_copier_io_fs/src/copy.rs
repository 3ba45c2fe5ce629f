//! Copy strategies and plan execution.

use std::path::Path;
use std::process::Command;

use crate::report::{ReportRun, ReportRunBuilder};
use crate::spec::{CopyError, EnumPlanAction, EnumPlanStatus, SpecPlanEntry};
use crate::util::copy_file_with_metadata;

////////////////////////////////////////////////////////////////////////////////
// #region CopyStrategies

/// A way of copying one file while keeping its metadata.
pub trait CopyStrategy {
    /// Short name shown in output.
    fn name(&self) -> &'static str;

    /// Copy `path_file_src` to `path_file_dst`.
    fn copy(&self, path_file_src: &Path, path_file_dst: &Path) -> Result<(), CopyError>;
}

/// `fs::copy` plus permissions, timestamps and Linux xattrs.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdCopyStrategy;

impl CopyStrategy for StdCopyStrategy {
    fn name(&self) -> &'static str {
        "std"
    }

    fn copy(&self, path_file_src: &Path, path_file_dst: &Path) -> Result<(), CopyError> {
        copy_file_with_metadata(path_file_src, path_file_dst)?;
        Ok(())
    }
}

/// macOS `ditto`, which also keeps Finder tags and resource forks.
#[derive(Debug, Default, Clone, Copy)]
pub struct DittoCopyStrategy;

impl DittoCopyStrategy {
    const C_PROGRAM: &'static str = "ditto";
}

impl CopyStrategy for DittoCopyStrategy {
    fn name(&self) -> &'static str {
        Self::C_PROGRAM
    }

    fn copy(&self, path_file_src: &Path, path_file_dst: &Path) -> Result<(), CopyError> {
        let output = Command::new(Self::C_PROGRAM)
            .arg(path_file_src)
            .arg(path_file_dst)
            .output()
            .map_err(|source| CopyError::CommandSpawnFailed {
                program: Self::C_PROGRAM,
                source,
            })?;
        if !output.status.success() {
            return Err(CopyError::CommandFailed {
                program: Self::C_PROGRAM,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Pick the most capable strategy for the host platform.
pub fn select_copy_strategy() -> Box<dyn CopyStrategy> {
    if cfg!(target_os = "macos") {
        Box::new(DittoCopyStrategy)
    } else {
        Box::new(StdCopyStrategy)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Execute

/// Execute `plan` in order, updating each entry's status in place.
///
/// Skip entries are counted without touching the filesystem. A failing copy
/// is recorded on its entry and in the report; the run always continues.
/// Destination existence is re-checked right before each copy so a file
/// created after planning is never overwritten.
pub fn execute_plan(plan: &mut [SpecPlanEntry], copy_strategy: &dyn CopyStrategy) -> ReportRun {
    let mut builder_run_report = ReportRunBuilder::default();

    for spec_entry in plan.iter_mut() {
        if spec_entry.action == EnumPlanAction::SkipAlreadyExists {
            spec_entry.mark(EnumPlanStatus::SkippedAlreadyExists, None);
            builder_run_report.add_skipped();
            continue;
        }

        if spec_entry.path_file_dst.exists() {
            tracing::info!(
                dst = %spec_entry.path_file_dst.display(),
                "destination appeared after planning; skipping"
            );
            spec_entry.mark(EnumPlanStatus::SkippedAlreadyExists, None);
            builder_run_report.add_skipped();
            continue;
        }

        match copy_strategy.copy(&spec_entry.path_file_src, &spec_entry.path_file_dst) {
            Ok(()) => {
                tracing::debug!(dst = %spec_entry.path_file_dst.display(), "copied");
                spec_entry.mark(EnumPlanStatus::Success, None);
                builder_run_report.add_copied();
            }
            Err(e) => {
                let exception = e.to_string();
                tracing::error!(
                    src = %spec_entry.path_file_src.display(),
                    dst = %spec_entry.path_file_dst.display(),
                    "copy failed: {exception}"
                );
                builder_run_report.add_error(spec_entry.path_file_dst.clone(), exception.clone());
                spec_entry.mark(EnumPlanStatus::Error, Some(exception));
            }
        }
    }

    builder_run_report.build()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
