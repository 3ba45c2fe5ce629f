//! Fatal command errors and exit codes.

use bang_copier_conf::ConfError;
use bang_copier_io_fs::ScanError;
use thiserror::Error;

/// Run completed, nothing failed (also: nothing to do, dry run).
pub const N_EXIT_OK: u8 = 0;
/// Run completed with at least one failed copy.
pub const N_EXIT_PARTIAL: u8 = 1;
/// Pre-flight failure; nothing was attempted.
pub const N_EXIT_FATAL: u8 = 2;

/// Errors that abort a command before any copy is attempted.
#[derive(Debug, Error)]
pub enum AppError {
    /// Config missing, malformed or invalid.
    #[error(transparent)]
    Conf(#[from] ConfError),
    /// Source directory unusable.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

impl AppError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Conf(_) | Self::Scan(_) => N_EXIT_FATAL,
        }
    }
}
