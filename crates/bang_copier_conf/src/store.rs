//! Config file load/validate/persist and destination management.
//!
//! Raw documents stay as [`serde_json::Value`] so rewrites keep keys this
//! tool does not know about. [`validate`] lifts a raw document into
//! [`SpecConfig`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};

use crate::conf::{TUP_LOG_FORMATS_DEFAULT, derive_fallback_log_dir};
use crate::spec::{ConfError, EnumLogFormat, SpecConfig};
use crate::util::resolve_user_path;

const C_KEY_DESTINATIONS: &str = "destinations";
const C_KEY_LOG_DIR: &str = "log_dir";
const C_KEY_LOG_FORMATS: &str = "log_formats";

////////////////////////////////////////////////////////////////////////////////
// #region LoadAndSave

/// Read and parse the JSON document at `path`.
pub fn load(path: &Path) -> Result<Value, ConfError> {
    let raw = match fs::read_to_string(path) {
        Ok(v) => v,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ConfError::ConfigNotFound(path.to_path_buf()));
        }
        Err(source) => {
            return Err(ConfError::ConfigReadError {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&raw).map_err(|source| ConfError::ConfigParseError {
        path: path.to_path_buf(),
        source,
    })
}

/// Like [`load`], but a missing file yields `{"destinations": []}`.
///
/// Nothing is written.
pub fn load_or_create(path: &Path) -> Result<Value, ConfError> {
    if !path.exists() {
        return Ok(json!({ "destinations": [] }));
    }
    load(path)
}

/// Write `config` as indented JSON, creating parent directories.
pub fn save(path: &Path, config: &Value) -> Result<(), ConfError> {
    let map_err = |message: String| ConfError::ConfigWriteError {
        path: path.to_path_buf(),
        message,
    };
    if let Some(path_parent) = path.parent()
        && !path_parent.as_os_str().is_empty()
    {
        fs::create_dir_all(path_parent).map_err(|e| map_err(e.to_string()))?;
    }
    let mut txt = serde_json::to_string_pretty(config).map_err(|e| map_err(e.to_string()))?;
    txt.push('\n');
    fs::write(path, txt).map_err(|e| map_err(e.to_string()))?;
    tracing::debug!(path = %path.display(), "config saved");
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Validate

/// Check document shape and destinations; default `log_formats` to `["log"]`.
pub fn validate(config: &Value) -> Result<SpecConfig, ConfError> {
    let Some(map_config) = config.as_object() else {
        return Err(ConfError::ConfigSchemaError(
            "Config root must be a JSON object".to_string(),
        ));
    };

    let Some(value_dsts) = map_config.get(C_KEY_DESTINATIONS) else {
        return Err(ConfError::ConfigSchemaError(
            "Config missing 'destinations' key".to_string(),
        ));
    };
    let Some(l_values_dst) = value_dsts.as_array() else {
        return Err(ConfError::ConfigSchemaError(
            "'destinations' must be a list".to_string(),
        ));
    };
    if l_values_dst.is_empty() {
        return Err(ConfError::ConfigSchemaError(
            "'destinations' list is empty".to_string(),
        ));
    }
    let mut l_raw_dsts = Vec::with_capacity(l_values_dst.len());
    for value_dst in l_values_dst {
        let Some(raw) = value_dst.as_str() else {
            return Err(ConfError::ConfigSchemaError(format!(
                "'destinations' contains non-string: {value_dst}"
            )));
        };
        l_raw_dsts.push(raw);
    }

    let mut destinations = Vec::with_capacity(l_raw_dsts.len());
    for raw in l_raw_dsts {
        destinations.push(resolve_existing_dir(raw)?);
    }

    let log_formats = match map_config.get(C_KEY_LOG_FORMATS) {
        None => TUP_LOG_FORMATS_DEFAULT.to_vec(),
        Some(value_fmts) => parse_log_formats(value_fmts)?,
    };

    let log_dir = map_config
        .get(C_KEY_LOG_DIR)
        .and_then(Value::as_str)
        .filter(|v| !v.is_empty())
        .map(str::to_owned);

    Ok(SpecConfig {
        destinations,
        log_dir,
        log_formats,
    })
}

fn parse_log_formats(value_fmts: &Value) -> Result<Vec<EnumLogFormat>, ConfError> {
    let Some(l_values_fmt) = value_fmts.as_array() else {
        return Err(ConfError::LogFormatInvalid(
            "'log_formats' must be a list".to_string(),
        ));
    };
    if l_values_fmt.is_empty() {
        return Err(ConfError::LogFormatInvalid(
            "'log_formats' list is empty".to_string(),
        ));
    }

    let mut l_fmts: Vec<EnumLogFormat> = Vec::with_capacity(l_values_fmt.len());
    for value_fmt in l_values_fmt {
        let Some(raw) = value_fmt.as_str() else {
            return Err(ConfError::LogFormatInvalid(format!(
                "'log_formats' contains non-string: {value_fmt}"
            )));
        };
        let enum_fmt: EnumLogFormat = raw.parse()?;
        if !l_fmts.contains(&enum_fmt) {
            l_fmts.push(enum_fmt);
        }
    }
    Ok(l_fmts)
}

fn resolve_existing_dir(raw: &str) -> Result<PathBuf, ConfError> {
    let path_dir = resolve_user_path(raw);
    if !path_dir.exists() {
        return Err(ConfError::DestinationInvalid {
            path: path_dir,
            reason: "folder does not exist",
        });
    }
    if !path_dir.is_dir() {
        return Err(ConfError::DestinationInvalid {
            path: path_dir,
            reason: "is not a directory",
        });
    }
    Ok(path_dir)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region LogDir

/// Log directory from `log_dir`, or `<home>/bang-copier-logs`. No side effects.
pub fn resolve_log_dir_path(config: &SpecConfig) -> Result<PathBuf, ConfError> {
    match config.log_dir.as_deref() {
        Some(raw) => Ok(resolve_user_path(raw)),
        None => derive_fallback_log_dir(),
    }
}

/// [`resolve_log_dir_path`], then create the directory (idempotent).
pub fn resolve_log_dir(config: &SpecConfig) -> Result<PathBuf, ConfError> {
    let path_dir_log = resolve_log_dir_path(config)?;
    fs::create_dir_all(&path_dir_log).map_err(|source| ConfError::LogDirInitFailed {
        path: path_dir_log.clone(),
        source,
    })?;
    Ok(path_dir_log)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Destinations

/// Configured destination strings as stored (non-strings dropped).
pub fn list_destinations(path: &Path) -> Result<Vec<String>, ConfError> {
    let config = load_or_create(path)?;
    Ok(config
        .get(C_KEY_DESTINATIONS)
        .and_then(Value::as_array)
        .map(|l| {
            l.iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default())
}

/// Append `dest` (resolved) unless already present, then persist.
///
/// Returns the resolved path and whether it was newly added. When already
/// present the file is left untouched.
pub fn add_destination(path: &Path, dest: &str) -> Result<(PathBuf, bool), ConfError> {
    let mut config = load_or_create(path)?;
    let path_dir_dst = resolve_existing_dir(dest)?;
    let c_dst = path_dir_dst.to_string_lossy().to_string();

    let l_dsts = destinations_mut(&mut config)?;
    if l_dsts.iter().any(|v| v.as_str() == Some(c_dst.as_str())) {
        tracing::debug!(dest = %c_dst, "destination already configured");
        return Ok((path_dir_dst, false));
    }
    l_dsts.push(Value::String(c_dst));
    save(path, &config)?;
    Ok((path_dir_dst, true))
}

/// Drop every entry resolving to `dest`, then persist.
///
/// No-op when the config file does not exist. Returns whether anything was
/// removed.
pub fn remove_destination(path: &Path, dest: &str) -> Result<bool, ConfError> {
    if !path.exists() {
        return Ok(false);
    }
    let mut config = load(path)?;
    let path_dir_dst = resolve_user_path(dest);

    let l_dsts = destinations_mut(&mut config)?;
    let n_before = l_dsts.len();
    l_dsts.retain(|v| match v.as_str() {
        Some(raw) => resolve_user_path(raw) != path_dir_dst,
        None => true,
    });
    let b_removed = l_dsts.len() != n_before;
    save(path, &config)?;
    Ok(b_removed)
}

/// Set `destinations` to an empty list and persist.
pub fn clear_destinations(path: &Path) -> Result<(), ConfError> {
    let mut config = load_or_create(path)?;
    destinations_mut(&mut config)?.clear();
    save(path, &config)
}

// Replaces a missing or non-list `destinations` with an empty list.
fn destinations_mut(config: &mut Value) -> Result<&mut Vec<Value>, ConfError> {
    let Some(map_config) = config.as_object_mut() else {
        return Err(ConfError::ConfigSchemaError(
            "Config root must be a JSON object".to_string(),
        ));
    };
    let value_dsts = map_config
        .entry(C_KEY_DESTINATIONS)
        .or_insert_with(|| Value::Array(Vec::new()));
    if !value_dsts.is_array() {
        *value_dsts = Value::Array(Vec::new());
    }
    value_dsts.as_array_mut().ok_or_else(|| {
        ConfError::ConfigSchemaError("'destinations' must be a list".to_string())
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use serde_json::{Value, json};
    use tempfile::TempDir;

    use super::*;

    fn write_json(path: &Path, value: &Value) {
        fs::write(path, serde_json::to_string(value).expect("json")).expect("write");
    }

    #[test]
    fn load_reports_missing_malformed_and_unreadable() {
        let tmp = TempDir::new().expect("tempdir");
        let path_missing = tmp.path().join("none.json");
        assert!(matches!(
            load(&path_missing).unwrap_err(),
            ConfError::ConfigNotFound(_)
        ));

        let path_bad = tmp.path().join("bad.json");
        fs::write(&path_bad, "{ not json").expect("write");
        assert!(matches!(
            load(&path_bad).unwrap_err(),
            ConfError::ConfigParseError { .. }
        ));

        // A directory cannot be read as a file.
        assert!(matches!(
            load(tmp.path()).unwrap_err(),
            ConfError::ConfigReadError { .. }
        ));
    }

    #[test]
    fn load_or_create_does_not_write() {
        let tmp = TempDir::new().expect("tempdir");
        let path_config = tmp.path().join("sub/config.json");
        let config = load_or_create(&path_config).expect("load");
        assert_eq!(config, json!({ "destinations": [] }));
        assert!(!path_config.exists());
        assert!(!tmp.path().join("sub").exists());
    }

    #[test]
    fn validate_rejects_bad_destinations_shape() {
        let l_cases = [
            json!({}),
            json!({ "destinations": "x" }),
            json!({ "destinations": [] }),
            json!({ "destinations": [1] }),
            json!([]),
        ];
        for config in l_cases {
            assert!(
                matches!(validate(&config), Err(ConfError::ConfigSchemaError(_))),
                "expected schema error for {config}"
            );
        }
    }

    #[test]
    fn validate_rejects_missing_or_file_destination() {
        let tmp = TempDir::new().expect("tempdir");
        let path_missing = tmp.path().join("missing");
        let err = validate(&json!({ "destinations": [path_missing.to_str().unwrap()] }))
            .unwrap_err();
        match err {
            ConfError::DestinationInvalid { path, reason } => {
                assert!(path.ends_with("missing"));
                assert_eq!(reason, "folder does not exist");
            }
            other => panic!("unexpected error: {other}"),
        }

        let path_file = tmp.path().join("file");
        fs::write(&path_file, "x").expect("write");
        let err =
            validate(&json!({ "destinations": [path_file.to_str().unwrap()] })).unwrap_err();
        assert!(matches!(
            err,
            ConfError::DestinationInvalid {
                reason: "is not a directory",
                ..
            }
        ));
    }

    #[test]
    fn validate_defaults_and_checks_log_formats() {
        let tmp = TempDir::new().expect("tempdir");
        let c_dst = tmp.path().to_str().unwrap();

        let spec_config = validate(&json!({ "destinations": [c_dst] })).expect("valid");
        assert_eq!(spec_config.log_formats, vec![EnumLogFormat::Log]);
        assert_eq!(
            spec_config.destinations,
            vec![fs::canonicalize(tmp.path()).expect("canonicalize")]
        );
        assert!(spec_config.log_dir.is_none());

        let spec_config = validate(&json!({
            "destinations": [c_dst],
            "log_formats": ["csv", "log", "csv", "json"],
            "log_dir": "",
        }))
        .expect("valid");
        assert_eq!(
            spec_config.log_formats,
            vec![EnumLogFormat::Csv, EnumLogFormat::Log, EnumLogFormat::Json]
        );
        assert!(spec_config.log_dir.is_none());

        for value_fmts in [json!([]), json!("log"), json!(["xml"]), json!([3])] {
            let err = validate(&json!({ "destinations": [c_dst], "log_formats": value_fmts }))
                .unwrap_err();
            assert!(matches!(err, ConfError::LogFormatInvalid(_)));
        }
    }

    #[test]
    fn resolve_log_dir_creates_idempotently() {
        let tmp = TempDir::new().expect("tempdir");
        let path_dir_log = tmp.path().join("logs/nested");
        let spec_config = SpecConfig {
            destinations: vec![tmp.path().to_path_buf()],
            log_dir: Some(path_dir_log.to_string_lossy().to_string()),
            log_formats: vec![EnumLogFormat::Log],
        };

        assert_eq!(resolve_log_dir_path(&spec_config).expect("path"), path_dir_log);
        assert!(!path_dir_log.exists());

        let path_first = resolve_log_dir(&spec_config).expect("create");
        let path_second = resolve_log_dir(&spec_config).expect("create again");
        assert_eq!(path_first, path_second);
        assert!(path_first.is_dir());
    }

    #[test]
    fn add_destination_creates_config_and_ignores_duplicates() {
        let tmp = TempDir::new().expect("tempdir");
        let path_config = tmp.path().join("cfg/config.json");
        let path_dir_dst = tmp.path().join("dst");
        fs::create_dir(&path_dir_dst).expect("mkdir");
        let c_resolved = fs::canonicalize(&path_dir_dst)
            .expect("canonicalize")
            .to_string_lossy()
            .to_string();

        let (_, b_added) =
            add_destination(&path_config, path_dir_dst.to_str().unwrap()).expect("add");
        assert!(b_added);
        assert_eq!(
            load(&path_config).expect("load"),
            json!({ "destinations": [c_resolved] })
        );
        let txt_before = fs::read_to_string(&path_config).expect("read");

        let (_, b_added) =
            add_destination(&path_config, path_dir_dst.to_str().unwrap()).expect("add again");
        assert!(!b_added);
        assert_eq!(fs::read_to_string(&path_config).expect("read"), txt_before);
    }

    #[test]
    fn add_destination_rejects_missing_dir_without_writing() {
        let tmp = TempDir::new().expect("tempdir");
        let path_config = tmp.path().join("config.json");
        let err = add_destination(&path_config, tmp.path().join("nope").to_str().unwrap())
            .unwrap_err();
        assert!(matches!(err, ConfError::DestinationInvalid { .. }));
        assert!(!path_config.exists());
    }

    #[test]
    fn add_destination_keeps_unknown_keys_and_repairs_list() {
        let tmp = TempDir::new().expect("tempdir");
        let path_config = tmp.path().join("config.json");
        write_json(
            &path_config,
            &json!({ "destinations": "oops", "log_dir": "/tmp/x", "extra": 1 }),
        );

        add_destination(&path_config, tmp.path().to_str().unwrap()).expect("add");
        let config = load(&path_config).expect("load");
        assert_eq!(config["extra"], json!(1));
        assert_eq!(config["log_dir"], json!("/tmp/x"));
        assert_eq!(config["destinations"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn remove_destination_matches_resolved_entries() {
        let tmp = TempDir::new().expect("tempdir");
        let path_config = tmp.path().join("config.json");
        let path_dir_a = tmp.path().join("a");
        let path_dir_b = tmp.path().join("b");
        fs::create_dir(&path_dir_a).expect("mkdir");
        fs::create_dir(&path_dir_b).expect("mkdir");
        let c_a_dotted = tmp.path().join("b/../a").to_string_lossy().to_string();
        write_json(
            &path_config,
            &json!({ "destinations": [c_a_dotted, path_dir_b.to_str().unwrap()] }),
        );

        assert!(remove_destination(&path_config, path_dir_a.to_str().unwrap()).expect("remove"));
        assert_eq!(
            list_destinations(&path_config).expect("list"),
            vec![path_dir_b.to_string_lossy().to_string()]
        );
        assert!(!remove_destination(&path_config, path_dir_a.to_str().unwrap()).expect("again"));
    }

    #[test]
    fn remove_destination_without_config_is_noop() {
        let tmp = TempDir::new().expect("tempdir");
        let path_config = tmp.path().join("config.json");
        assert!(!remove_destination(&path_config, "/anything").expect("remove"));
        assert!(!path_config.exists());
    }

    #[test]
    fn clear_destinations_persists_empty_list() {
        let tmp = TempDir::new().expect("tempdir");
        let path_config = tmp.path().join("config.json");
        write_json(
            &path_config,
            &json!({ "destinations": ["/a", "/b"], "log_formats": ["csv"] }),
        );

        clear_destinations(&path_config).expect("clear");
        let config = load(&path_config).expect("load");
        assert_eq!(config["destinations"], json!([]));
        assert_eq!(config["log_formats"], json!(["csv"]));

        let path_new = tmp.path().join("new/config.json");
        clear_destinations(&path_new).expect("clear new");
        assert_eq!(load(&path_new).expect("load"), json!({ "destinations": [] }));
    }
}
