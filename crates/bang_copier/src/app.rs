//! Command dispatch: destination management or a scan/plan/copy/log run.

use std::path::{Path, PathBuf};

use bang_copier_conf::{
    add_destination, clear_destinations, derive_default_config_path, list_destinations, load,
    remove_destination, resolve_log_dir, resolve_log_dir_path, resolve_user_path, validate,
};
use bang_copier_io_fs::{
    ScanError, compute_rename_map, execute_plan, plan_operations, scan_marker_files,
    select_copy_strategy,
};
use bang_copier_log::write_logs;

use crate::cli::{Cli, EnumAction};
use crate::error::{AppError, N_EXIT_OK, N_EXIT_PARTIAL};
use crate::render::{Renderer, SpecRunHeader, SpecRunSummary};

/// Execute one invocation and return its exit code.
///
/// `Err` means a fatal pre-flight failure; see [`AppError::exit_code`].
pub fn run(cli: &Cli, renderer: &dyn Renderer) -> Result<u8, AppError> {
    let path_config = match cli.config.as_deref() {
        Some(raw) => resolve_user_path(raw),
        None => derive_default_config_path()?,
    };

    match cli.action() {
        EnumAction::ListDests => {
            renderer.list_destinations(&list_destinations(&path_config)?);
        }
        EnumAction::AddDest(dest) => {
            let (path_dir_dst, b_added) = add_destination(&path_config, dest)?;
            renderer.added_destination(&path_dir_dst, b_added);
        }
        EnumAction::RemoveDest(dest) => {
            let b_removed = remove_destination(&path_config, dest)?;
            renderer.removed_destination(dest, b_removed);
        }
        EnumAction::ClearDests => {
            clear_destinations(&path_config)?;
            renderer.cleared_destinations();
        }
        EnumAction::Run => return run_copy(cli, &path_config, renderer),
    }
    Ok(N_EXIT_OK)
}

fn run_copy(cli: &Cli, path_config: &Path, renderer: &dyn Renderer) -> Result<u8, AppError> {
    let path_dir_src = resolve_user_path(&cli.source);
    if !path_dir_src.is_dir() {
        return Err(ScanError::SourceNotDirectory(path_dir_src).into());
    }

    let spec_config = validate(&load(path_config)?)?;
    // Dry runs must not even create the log directory.
    let path_dir_log: PathBuf = if cli.dry_run {
        resolve_log_dir_path(&spec_config)?
    } else {
        resolve_log_dir(&spec_config)?
    };
    renderer.config_summary(&SpecRunHeader {
        path_dir_src: &path_dir_src,
        path_config,
        config: &spec_config,
        path_dir_log: &path_dir_log,
        dry_run: cli.dry_run,
    });

    let l_files = scan_marker_files(&path_dir_src)?;
    tracing::info!(source = %path_dir_src.display(), n_matched = l_files.len(), "scan done");
    if l_files.is_empty() {
        renderer.no_matches();
        renderer.summary(&SpecRunSummary {
            n_matched: 0,
            n_planned: 0,
            report: None,
            path_log: None,
            dry_run: cli.dry_run,
        });
        return Ok(N_EXIT_OK);
    }

    let source_folder_name = path_dir_src.file_name().unwrap_or_default();
    let l_renames = compute_rename_map(&l_files, source_folder_name);
    renderer.matches(&l_renames);

    let mut l_plan = plan_operations(&l_renames, &spec_config.destinations);
    if cli.dry_run {
        renderer.dry_run_plan(&l_plan);
        renderer.summary(&SpecRunSummary {
            n_matched: l_files.len(),
            n_planned: l_plan.len(),
            report: None,
            path_log: None,
            dry_run: true,
        });
        return Ok(N_EXIT_OK);
    }

    let copy_strategy = select_copy_strategy();
    tracing::info!(strategy = copy_strategy.name(), n_planned = l_plan.len(), "executing plan");
    let report_run = execute_plan(&mut l_plan, copy_strategy.as_ref());
    renderer.execution_results(&l_plan);

    let report_logs = write_logs(&l_plan, &spec_config, &path_dir_log, &path_dir_src);
    renderer.logs_written(&report_logs);
    renderer.summary(&SpecRunSummary {
        n_matched: l_files.len(),
        n_planned: l_plan.len(),
        report: Some(&report_run),
        path_log: report_logs.path_log(),
        dry_run: false,
    });
    tracing::info!("{report_run}");

    if report_run.has_errors() {
        Ok(N_EXIT_PARTIAL)
    } else {
        Ok(N_EXIT_OK)
    }
}
