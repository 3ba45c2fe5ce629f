//! Command-line surface.

use clap::{ArgGroup, Parser};

const C_EXAMPLES: &str = "\
Examples:
  bang <folder>                    # scan given folder
  bang --dry-run                   # show what would happen
  bang --list-dests                # show configured destinations
  bang --add-dest /path/to/dir     # add a new destination
  bang --remove-dest /path/to/dir  # remove a destination
  bang --clear-dests               # remove all destinations";

/// Scan a folder for files starting with '!' and copy them to destinations.
#[derive(Debug, Clone, Parser)]
#[command(name = "bang", version, long_about = None, after_help = C_EXAMPLES)]
#[command(group(
    ArgGroup::new("manage")
        .args(["list_dests", "add_dest", "remove_dest", "clear_dests"])
        .multiple(false)
))]
pub struct Cli {
    /// Source directory to scan.
    #[arg(default_value = ".")]
    pub source: String,
    /// JSON config file [default: ~/.config/bang-copier/config.json].
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,
    /// Plan only: no copies, no log files.
    #[arg(long)]
    pub dry_run: bool,
    /// Show configured destinations and exit.
    #[arg(long)]
    pub list_dests: bool,
    /// Add a destination directory to the config and exit.
    #[arg(long, value_name = "PATH")]
    pub add_dest: Option<String>,
    /// Remove a destination directory from the config and exit.
    #[arg(long, value_name = "PATH")]
    pub remove_dest: Option<String>,
    /// Remove all destinations from the config and exit.
    #[arg(long)]
    pub clear_dests: bool,
    /// Debug-level diagnostics on stderr.
    #[arg(short, long)]
    pub verbose: bool,
    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
    /// Plain text output even on a terminal.
    #[arg(long)]
    pub plain: bool,
}

/// What one invocation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumAction<'a> {
    /// Scan, plan, copy, log.
    Run,
    /// Print configured destinations.
    ListDests,
    /// Add one destination.
    AddDest(&'a str),
    /// Remove one destination.
    RemoveDest(&'a str),
    /// Remove all destinations.
    ClearDests,
}

impl Cli {
    /// Management flags short-circuit the copy run.
    pub fn action(&self) -> EnumAction<'_> {
        if self.list_dests {
            EnumAction::ListDests
        } else if let Some(dest) = self.add_dest.as_deref() {
            EnumAction::AddDest(dest)
        } else if let Some(dest) = self.remove_dest.as_deref() {
            EnumAction::RemoveDest(dest)
        } else if self.clear_dests {
            EnumAction::ClearDests
        } else {
            EnumAction::Run
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, EnumAction};

    #[test]
    fn defaults_to_current_dir_run() {
        let cli = Cli::try_parse_from(["bang"]).expect("parse");
        assert_eq!(cli.source, ".");
        assert!(cli.config.is_none());
        assert!(!cli.dry_run);
        assert_eq!(cli.action(), EnumAction::Run);
    }

    #[test]
    fn management_flags_map_to_actions() {
        let cli = Cli::try_parse_from(["bang", "--add-dest", "/x"]).expect("parse");
        assert_eq!(cli.action(), EnumAction::AddDest("/x"));
        let cli = Cli::try_parse_from(["bang", "--remove-dest", "/x"]).expect("parse");
        assert_eq!(cli.action(), EnumAction::RemoveDest("/x"));
        let cli = Cli::try_parse_from(["bang", "--clear-dests"]).expect("parse");
        assert_eq!(cli.action(), EnumAction::ClearDests);
        let cli = Cli::try_parse_from(["bang", "--list-dests"]).expect("parse");
        assert_eq!(cli.action(), EnumAction::ListDests);
    }

    #[test]
    fn management_flags_are_mutually_exclusive() {
        assert!(Cli::try_parse_from(["bang", "--list-dests", "--clear-dests"]).is_err());
        assert!(Cli::try_parse_from(["bang", "--add-dest", "/a", "--remove-dest", "/b"]).is_err());
    }

    #[test]
    fn run_flags_parse() {
        let cli = Cli::try_parse_from(["bang", "src", "--config", "c.json", "--dry-run", "-v"])
            .expect("parse");
        assert_eq!(cli.source, "src");
        assert_eq!(cli.config.as_deref(), Some("c.json"));
        assert!(cli.dry_run);
        assert!(cli.verbose);
    }
}
