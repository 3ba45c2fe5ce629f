use std::fs;
use std::io;
use std::path::Path;

use filetime::{FileTime, set_file_times};

////////////////////////////////////////////////////////////////////////////////
// #region MetadataCopy

/// Copy bytes, then carry over permissions, access/modify times and
/// (on Linux) extended attributes.
pub(crate) fn copy_file_with_metadata(
    path_file_src: &Path,
    path_file_dst: &Path,
) -> Result<(), io::Error> {
    fs::copy(path_file_src, path_file_dst)?;
    apply_metadata(path_file_src, path_file_dst)?;
    Ok(())
}

fn apply_metadata(path_file_src: &Path, path_file_dst: &Path) -> Result<(), io::Error> {
    let stat_src = fs::metadata(path_file_src)?;
    fs::set_permissions(path_file_dst, stat_src.permissions())?;

    let file_time_access = FileTime::from_last_access_time(&stat_src);
    let file_time_modify = FileTime::from_last_modification_time(&stat_src);
    set_file_times(path_file_dst, file_time_access, file_time_modify)?;

    #[cfg(target_os = "linux")]
    copy_xattrs_linux(path_file_src, path_file_dst);
    Ok(())
}

// Best effort: a destination filesystem without xattr support keeps the
// copied bytes and loses the attributes.
#[cfg(target_os = "linux")]
fn copy_xattrs_linux(path_file_src: &Path, path_file_dst: &Path) {
    let l_names: Vec<_> = match xattr::list(path_file_src) {
        Ok(iter_names) => iter_names.collect(),
        Err(e) => {
            tracing::debug!(path = %path_file_src.display(), "xattr list failed: {e}");
            return;
        }
    };

    let mut n_copied = 0_usize;
    for name in &l_names {
        let Ok(Some(raw_value)) = xattr::get(path_file_src, name) else {
            continue;
        };
        if xattr::set(path_file_dst, name, &raw_value).is_ok() {
            n_copied += 1;
        }
    }
    if n_copied < l_names.len() {
        tracing::debug!(
            path = %path_file_dst.display(),
            n_copied,
            n_total = l_names.len(),
            "some xattrs were not carried over"
        );
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
