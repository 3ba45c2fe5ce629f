//! Path expansion and resolution helpers.

use std::env;
use std::path::{Component, Path, PathBuf};

/// Expand a leading `~` or `~/` to the user's home directory.
///
/// Left untouched when no home directory is known or for `~user` forms.
pub fn expand_user(raw: &str) -> PathBuf {
    let Some(path_home) = dirs::home_dir() else {
        return PathBuf::from(raw);
    };
    if raw == "~" {
        return path_home;
    }
    match raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        Some(rest) => path_home.join(rest),
        None => PathBuf::from(raw),
    }
}

/// Resolve a path to an absolute, normalized path.
///
/// Existing paths are canonicalized (symlinks resolved). Missing paths are
/// made absolute against CWD and `.`/`..` are folded syntactically.
pub fn resolve_absolute_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
    };

    if let Ok(canonical) = std::fs::canonicalize(&absolute) {
        return canonical;
    }
    normalize_syntactic(&absolute)
}

/// `expand_user` followed by `resolve_absolute_path`.
pub fn resolve_user_path(raw: &str) -> PathBuf {
    resolve_absolute_path(&expand_user(raw))
}

fn normalize_syntactic(path: &Path) -> PathBuf {
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(..) | Component::RootDir | Component::Normal(_) => {
                components.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if let Some(Component::Normal(_)) = components.last() {
                    components.pop();
                }
            }
        }
    }
    components.into_iter().collect()
}
