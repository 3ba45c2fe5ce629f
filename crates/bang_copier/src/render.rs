//! Human-readable output. Two interchangeable renderers, picked once at startup.

use std::io::{self, IsTerminal};
use std::path::Path;

use bang_copier_conf::SpecConfig;
use bang_copier_io_fs::{EnumPlanAction, EnumPlanStatus, ReportRun, SpecPlanEntry, SpecRenameEntry};
use bang_copier_log::ReportLogs;
use colored::Colorize;
use comfy_table::{Cell, Color, Table, presets::UTF8_FULL};

/// Inputs shown in the config summary.
pub struct SpecRunHeader<'a> {
    pub path_dir_src: &'a Path,
    pub path_config: &'a Path,
    pub config: &'a SpecConfig,
    pub path_dir_log: &'a Path,
    pub dry_run: bool,
}

/// End-of-run totals.
pub struct SpecRunSummary<'a> {
    pub n_matched: usize,
    pub n_planned: usize,
    pub report: Option<&'a ReportRun>,
    pub path_log: Option<&'a Path>,
    pub dry_run: bool,
}

/// Output sink for every command stage.
pub trait Renderer {
    fn config_summary(&self, spec_header: &SpecRunHeader<'_>);
    fn no_matches(&self);
    fn matches(&self, renames: &[SpecRenameEntry]);
    fn dry_run_plan(&self, plan: &[SpecPlanEntry]);
    fn execution_results(&self, plan: &[SpecPlanEntry]);
    fn logs_written(&self, report_logs: &ReportLogs);
    fn summary(&self, spec_summary: &SpecRunSummary<'_>);
    fn list_destinations(&self, destinations: &[String]);
    fn added_destination(&self, path_dir_dst: &Path, added: bool);
    fn removed_destination(&self, dest: &str, removed: bool);
    fn cleared_destinations(&self);
}

/// Table renderer on an interactive stdout, plain text otherwise.
pub fn select_renderer(force_plain: bool) -> Box<dyn Renderer> {
    if !force_plain && io::stdout().is_terminal() {
        Box::new(TableRenderer)
    } else {
        Box::new(PlainRenderer)
    }
}

fn name_of(path: &Path) -> String {
    path.file_name()
        .map(|v| v.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn summary_lines(spec_summary: &SpecRunSummary<'_>) -> Vec<(String, String)> {
    let mut l_lines = vec![
        ("Matched files".to_string(), spec_summary.n_matched.to_string()),
        ("Planned operations".to_string(), spec_summary.n_planned.to_string()),
    ];
    if let Some(report) = spec_summary.report {
        l_lines.push(("Copies".to_string(), report.cnt_copied.to_string()));
        l_lines.push(("Skips".to_string(), report.cnt_skipped.to_string()));
        l_lines.push(("Errors".to_string(), report.error_count().to_string()));
    }
    if let Some(path_log) = spec_summary.path_log {
        l_lines.push(("Log".to_string(), path_log.display().to_string()));
    }
    l_lines
}

////////////////////////////////////////////////////////////////////////////////
// #region PlainRenderer

/// Line-oriented output with no styling.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
    fn config_summary(&self, spec_header: &SpecRunHeader<'_>) {
        println!("Config loaded and validated");
        println!("  Destinations:");
        for path_dir_dst in &spec_header.config.destinations {
            println!("    - {}", path_dir_dst.display());
        }
        println!("  Log directory: {}", spec_header.path_dir_log.display());
        println!("  Source: {}", spec_header.path_dir_src.display());
        println!("  Config: {}", spec_header.path_config.display());
        println!("  Dry run: {}", spec_header.dry_run);
        println!();
    }

    fn no_matches(&self) {
        println!("No eligible '!' files found. Exiting.");
    }

    fn matches(&self, renames: &[SpecRenameEntry]) {
        println!("Found {} eligible file(s):", renames.len());
        for spec_rename in renames {
            println!(
                "  - {} -> {}",
                name_of(&spec_rename.path_file_src),
                spec_rename.new_filename.to_string_lossy()
            );
        }
        println!();
    }

    fn dry_run_plan(&self, plan: &[SpecPlanEntry]) {
        println!("Dry run plan:");
        for spec_entry in plan {
            println!(
                "  [{}] {} -> {}",
                spec_entry.action,
                spec_entry.path_file_src.display(),
                spec_entry.path_file_dst.display()
            );
        }
        println!();
    }

    fn execution_results(&self, plan: &[SpecPlanEntry]) {
        println!("Execution results:");
        for spec_entry in plan {
            match spec_entry.error.as_deref() {
                Some(msg) => println!(
                    "  [{}] {}: {msg}",
                    spec_entry.status,
                    spec_entry.path_file_dst.display()
                ),
                None => println!(
                    "  [{}] {}",
                    spec_entry.status,
                    spec_entry.path_file_dst.display()
                ),
            }
        }
        println!();
    }

    fn logs_written(&self, report_logs: &ReportLogs) {
        for (enum_fmt, path) in &report_logs.written {
            println!("{} log written: {}", enum_fmt, path.display());
        }
        for (enum_fmt, msg) in &report_logs.errors {
            eprintln!("ERROR: Failed to write {enum_fmt} log: {msg}");
        }
    }

    fn summary(&self, spec_summary: &SpecRunSummary<'_>) {
        println!("Summary:");
        for (key, value) in summary_lines(spec_summary) {
            println!("  {key}: {value}");
        }
        if spec_summary.dry_run {
            println!("  (dry run: nothing was copied or logged)");
        }
    }

    fn list_destinations(&self, destinations: &[String]) {
        if destinations.is_empty() {
            println!("No destinations configured.");
            return;
        }
        println!("Configured destinations:");
        for (i, dest) in destinations.iter().enumerate() {
            println!("  {}. {dest}", i + 1);
        }
    }

    fn added_destination(&self, path_dir_dst: &Path, added: bool) {
        if added {
            println!("Added destination: {}", path_dir_dst.display());
        } else {
            println!("Destination already configured: {}", path_dir_dst.display());
        }
    }

    fn removed_destination(&self, dest: &str, removed: bool) {
        if removed {
            println!("Removed destination: {dest}");
        } else {
            println!("Destination not present: {dest}");
        }
    }

    fn cleared_destinations(&self) {
        println!("Cleared all destinations.");
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region TableRenderer

/// `comfy-table` tables with coloured status cells.
#[derive(Debug, Default, Clone, Copy)]
pub struct TableRenderer;

impl TableRenderer {
    fn new_table(header: Vec<&str>) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(header);
        table
    }

    fn action_cell(action: EnumPlanAction) -> Cell {
        let color = match action {
            EnumPlanAction::Copy => Color::Green,
            EnumPlanAction::SkipAlreadyExists => Color::Yellow,
        };
        Cell::new(action.as_str()).fg(color)
    }

    fn status_cell(status: EnumPlanStatus) -> Cell {
        let color = match status {
            EnumPlanStatus::Success => Color::Green,
            EnumPlanStatus::SkippedAlreadyExists => Color::Yellow,
            EnumPlanStatus::Error => Color::Red,
            EnumPlanStatus::Pending => Color::Grey,
        };
        Cell::new(status.as_str()).fg(color)
    }
}

impl Renderer for TableRenderer {
    fn config_summary(&self, spec_header: &SpecRunHeader<'_>) {
        println!("{}", "Bang File Copier".bold().cyan());
        println!("{} Config loaded and validated", "✓".green());
        let mut table = Self::new_table(vec!["Setting", "Value"]);
        for path_dir_dst in &spec_header.config.destinations {
            table.add_row(vec!["Destination".to_string(), path_dir_dst.display().to_string()]);
        }
        table.add_row(vec![
            "Log directory".to_string(),
            spec_header.path_dir_log.display().to_string(),
        ]);
        let l_fmts: Vec<&str> = spec_header
            .config
            .log_formats
            .iter()
            .map(|v| v.as_str())
            .collect();
        table.add_row(vec!["Log formats".to_string(), l_fmts.join(", ")]);
        table.add_row(vec![
            "Source".to_string(),
            spec_header.path_dir_src.display().to_string(),
        ]);
        table.add_row(vec![
            "Config".to_string(),
            spec_header.path_config.display().to_string(),
        ]);
        table.add_row(vec!["Dry run".to_string(), spec_header.dry_run.to_string()]);
        println!("{table}");
    }

    fn no_matches(&self) {
        println!("{}", "No eligible '!' files found. Exiting.".yellow());
    }

    fn matches(&self, renames: &[SpecRenameEntry]) {
        println!(
            "{}",
            format!("Found {} eligible file(s)", renames.len()).bold()
        );
        let mut table = Self::new_table(vec!["Original", "Clean", "New name"]);
        for spec_rename in renames {
            table.add_row(vec![
                name_of(&spec_rename.path_file_src),
                spec_rename.clean_basename.to_string_lossy().to_string(),
                spec_rename.new_filename.to_string_lossy().to_string(),
            ]);
        }
        println!("{table}");
    }

    fn dry_run_plan(&self, plan: &[SpecPlanEntry]) {
        println!("{}", "Dry run plan".bold());
        let mut table = Self::new_table(vec!["Action", "Source", "Destination"]);
        for spec_entry in plan {
            table.add_row(vec![
                Self::action_cell(spec_entry.action),
                Cell::new(spec_entry.original_filename()),
                Cell::new(spec_entry.path_file_dst.display()),
            ]);
        }
        println!("{table}");
    }

    fn execution_results(&self, plan: &[SpecPlanEntry]) {
        println!("{}", "Execution results".bold());
        let mut table = Self::new_table(vec!["Status", "Destination", "Message"]);
        for spec_entry in plan {
            table.add_row(vec![
                Self::status_cell(spec_entry.status),
                Cell::new(spec_entry.path_file_dst.display()),
                Cell::new(spec_entry.error.as_deref().unwrap_or("")),
            ]);
        }
        println!("{table}");
    }

    fn logs_written(&self, report_logs: &ReportLogs) {
        for (enum_fmt, path) in &report_logs.written {
            println!(
                "{} {} log written: {}",
                "✓".green(),
                enum_fmt,
                path.display()
            );
        }
        for (enum_fmt, msg) in &report_logs.errors {
            eprintln!(
                "{} Failed to write {enum_fmt} log: {msg}",
                "✗".red()
            );
        }
    }

    fn summary(&self, spec_summary: &SpecRunSummary<'_>) {
        let title = if spec_summary.dry_run {
            "Summary (dry run)"
        } else {
            "Summary"
        };
        println!("{}", title.bold());
        let mut table = Self::new_table(vec!["", ""]);
        for (key, value) in summary_lines(spec_summary) {
            let cell_value = match key.as_str() {
                "Errors" if value != "0" => Cell::new(value).fg(Color::Red),
                "Copies" if value != "0" => Cell::new(value).fg(Color::Green),
                _ => Cell::new(value),
            };
            table.add_row(vec![Cell::new(key), cell_value]);
        }
        println!("{table}");
    }

    fn list_destinations(&self, destinations: &[String]) {
        if destinations.is_empty() {
            println!("{}", "No destinations configured.".yellow());
            return;
        }
        let mut table = Self::new_table(vec!["#", "Destination"]);
        for (i, dest) in destinations.iter().enumerate() {
            table.add_row(vec![(i + 1).to_string(), dest.clone()]);
        }
        println!("{table}");
    }

    fn added_destination(&self, path_dir_dst: &Path, added: bool) {
        if added {
            println!("{} Added destination: {}", "✓".green(), path_dir_dst.display());
        } else {
            println!(
                "{} Destination already configured: {}",
                "•".yellow(),
                path_dir_dst.display()
            );
        }
    }

    fn removed_destination(&self, dest: &str, removed: bool) {
        if removed {
            println!("{} Removed destination: {dest}", "✓".green());
        } else {
            println!("{} Destination not present: {dest}", "•".yellow());
        }
    }

    fn cleared_destinations(&self) {
        println!("{} Cleared all destinations.", "✓".green());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
