//! Config constants and default path factories.

use std::path::PathBuf;

use crate::spec::{ConfError, EnumLogFormat};

/// Config file location relative to the home directory.
pub const C_PATH_CONFIG_REL: &str = ".config/bang-copier/config.json";
/// Fallback log directory name under the home directory.
pub const C_DIR_LOG_FALLBACK: &str = "bang-copier-logs";
/// Formats enabled when `log_formats` is absent.
pub const TUP_LOG_FORMATS_DEFAULT: [EnumLogFormat; 1] = [EnumLogFormat::Log];

/// `<home>/.config/bang-copier/config.json`.
pub fn derive_default_config_path() -> Result<PathBuf, ConfError> {
    let path_home = dirs::home_dir().ok_or(ConfError::HomeDirUnavailable)?;
    Ok(path_home.join(C_PATH_CONFIG_REL))
}

/// `<home>/bang-copier-logs`.
pub fn derive_fallback_log_dir() -> Result<PathBuf, ConfError> {
    let path_home = dirs::home_dir().ok_or(ConfError::HomeDirUnavailable)?;
    Ok(path_home.join(C_DIR_LOG_FALLBACK))
}
