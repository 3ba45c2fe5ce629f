//! Validated configuration model, log formats and errors.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Run-log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EnumLogFormat {
    /// Pipe-delimited text log.
    Log,
    /// Comma-separated values.
    Csv,
    /// JSON document.
    Json,
}

impl EnumLogFormat {
    /// Every accepted format, in canonical order.
    pub const ALL: [EnumLogFormat; 3] = [Self::Log, Self::Csv, Self::Json];

    /// Config-file spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Log file extension.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for EnumLogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnumLogFormat {
    type Err = ConfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "log" => Ok(Self::Log),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(ConfError::LogFormatInvalid(format!(
                "Unsupported log format: {other}"
            ))),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Structs

/// Configuration after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecConfig {
    /// Resolved destination directories, in file order. Never empty.
    pub destinations: Vec<PathBuf>,
    /// Raw `log_dir` value, if set and non-empty.
    pub log_dir: Option<String>,
    /// Enabled log formats, de-duplicated in file order. Never empty.
    pub log_formats: Vec<EnumLogFormat>,
}

impl SpecConfig {
    /// Whether `format` is enabled.
    pub fn has_log_format(&self, format: EnumLogFormat) -> bool {
        self.log_formats.contains(&format)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Config load/validate/persist failures. All fatal to the invoking command.
#[derive(Debug, Error)]
pub enum ConfError {
    /// Config file does not exist.
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),
    /// Config file is not valid JSON.
    #[error("Invalid JSON in config file {}: {source}", path.display())]
    ConfigParseError {
        /// Config file path.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },
    /// Any other read failure.
    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigReadError {
        /// Config file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Persisting the config failed.
    #[error("Failed to write config file {}: {message}", path.display())]
    ConfigWriteError {
        /// Config file path.
        path: PathBuf,
        /// Underlying error text.
        message: String,
    },
    /// Document shape is wrong (missing/empty/mistyped `destinations`).
    #[error("{0}")]
    ConfigSchemaError(String),
    /// A destination does not resolve to an existing directory.
    #[error("Destination {reason}: {}", path.display())]
    DestinationInvalid {
        /// Resolved offending path.
        path: PathBuf,
        /// `"folder does not exist"` or `"is not a directory"`.
        reason: &'static str,
    },
    /// `log_formats` is malformed or names an unknown format.
    #[error("{0}")]
    LogFormatInvalid(String),
    /// Log directory could not be created.
    #[error("Failed to create log directory {}: {source}", path.display())]
    LogDirInitFailed {
        /// Log directory path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// A default path needs the home directory and none is known.
    #[error("Could not determine the home directory")]
    HomeDirUnavailable,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
