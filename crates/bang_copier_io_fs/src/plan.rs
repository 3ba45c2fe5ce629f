//! Rename-map derivation and per-destination operation planning.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::scan::C_MARKER;
use crate::spec::{EnumPlanAction, EnumPlanStatus, SpecPlanEntry, SpecRenameEntry};

/// Derive destination names for matched files.
///
/// Pure: strips every leading `!` from each basename and prefixes the result
/// with `source_folder_name` and a single space. Names are kept as `OsString`
/// so non-UTF-8 bytes pass through unchanged.
pub fn compute_rename_map<S: AsRef<OsStr>>(
    files: &[PathBuf],
    source_folder_name: S,
) -> Vec<SpecRenameEntry> {
    files
        .iter()
        .map(|path_file_src| {
            let clean_basename = path_file_src
                .file_name()
                .map(strip_markers)
                .unwrap_or_default();
            let mut new_filename = source_folder_name.as_ref().to_os_string();
            new_filename.push(" ");
            new_filename.push(&clean_basename);
            SpecRenameEntry {
                path_file_src: path_file_src.clone(),
                clean_basename,
                new_filename,
            }
        })
        .collect()
}

#[cfg(unix)]
fn strip_markers(name: &OsStr) -> OsString {
    use std::os::unix::ffi::OsStrExt;

    let raw = name.as_bytes();
    let n_markers = raw.iter().take_while(|b| **b == C_MARKER as u8).count();
    OsStr::from_bytes(&raw[n_markers..]).to_os_string()
}

// Non-Unix names that are not valid Unicode degrade to a lossy rendering.
#[cfg(not(unix))]
fn strip_markers(name: &OsStr) -> OsString {
    OsString::from(name.to_string_lossy().trim_start_matches(C_MARKER))
}

/// Cross rename entries with destinations, deciding COPY vs SKIP per pair.
///
/// Produces exactly `renames.len() * destinations.len()` entries, grouped by
/// file and keeping destination order within each group. The existence check
/// is not atomic with respect to later execution.
pub fn plan_operations<P: AsRef<Path>>(
    renames: &[SpecRenameEntry],
    destinations: &[P],
) -> Vec<SpecPlanEntry> {
    let mut l_plan = Vec::with_capacity(renames.len() * destinations.len());
    for spec_rename in renames {
        for dir_destination in destinations {
            let path_dir_dst = dir_destination.as_ref().to_path_buf();
            let path_file_dst = path_dir_dst.join(&spec_rename.new_filename);
            let action = if path_file_dst.exists() {
                EnumPlanAction::SkipAlreadyExists
            } else {
                EnumPlanAction::Copy
            };
            tracing::debug!(
                src = %spec_rename.path_file_src.display(),
                dst = %path_file_dst.display(),
                action = action.as_str(),
                "planned"
            );
            l_plan.push(SpecPlanEntry {
                path_file_src: spec_rename.path_file_src.clone(),
                path_dir_dst,
                path_file_dst,
                action,
                status: EnumPlanStatus::Pending,
                error: None,
                ts_done: None,
            });
        }
    }
    l_plan
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::{compute_rename_map, plan_operations};
    use crate::spec::{EnumPlanAction, EnumPlanStatus};

    #[test]
    fn rename_map_strips_markers_and_prefixes_folder() {
        let l_files = vec![
            PathBuf::from("/src/Q1/!!report.txt"),
            PathBuf::from("/src/Q1/!budget.csv"),
            PathBuf::from("/src/Q1/!!!a!b.md"),
        ];
        let l_renames = compute_rename_map(&l_files, "Q1");

        assert_eq!(l_renames.len(), 3);
        assert_eq!(l_renames[0].clean_basename, "report.txt");
        assert_eq!(l_renames[0].new_filename, "Q1 report.txt");
        assert_eq!(l_renames[1].new_filename, "Q1 budget.csv");
        assert_eq!(l_renames[2].clean_basename, "a!b.md");
        assert_eq!(l_renames[2].path_file_src, l_files[2]);
    }

    #[cfg(unix)]
    #[test]
    fn rename_map_keeps_non_utf8_bytes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let l_files = vec![PathBuf::from(OsStr::from_bytes(b"/src/Q1/!!caf\xe9.txt"))];
        let l_renames = compute_rename_map(&l_files, "Q1");

        assert_eq!(l_renames[0].clean_basename.as_bytes(), b"caf\xe9.txt");
        assert_eq!(l_renames[0].new_filename.as_bytes(), b"Q1 caf\xe9.txt");
    }

    #[test]
    fn rename_map_is_deterministic() {
        let l_files = vec![PathBuf::from("/x/!one"), PathBuf::from("/x/!!two")];
        assert_eq!(
            compute_rename_map(&l_files, "x"),
            compute_rename_map(&l_files, "x")
        );
    }

    #[test]
    fn plan_is_full_cross_product_in_destination_order() {
        let tmp = TempDir::new().expect("tempdir");
        let d1 = tmp.path().join("d1");
        let d2 = tmp.path().join("d2");
        let d3 = tmp.path().join("d3");
        for d in [&d1, &d2, &d3] {
            fs::create_dir(d).expect("mkdir");
        }
        fs::write(d2.join("Q1 report.txt"), "old").expect("write");

        let l_files = vec![
            PathBuf::from("/src/Q1/!!report.txt"),
            PathBuf::from("/src/Q1/!budget.csv"),
        ];
        let l_renames = compute_rename_map(&l_files, "Q1");
        let l_dsts = vec![d1.clone(), d2.clone(), d3.clone()];
        let l_plan = plan_operations(&l_renames, &l_dsts);

        assert_eq!(l_plan.len(), 6);
        let l_dirs: Vec<_> = l_plan.iter().map(|p| p.path_dir_dst.clone()).collect();
        assert_eq!(l_dirs, vec![d1.clone(), d2.clone(), d3.clone(), d1, d2.clone(), d3]);
        assert_eq!(l_plan[1].action, EnumPlanAction::SkipAlreadyExists);
        assert_eq!(l_plan[1].path_file_dst, d2.join("Q1 report.txt"));
        assert!(
            l_plan
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != 1)
                .all(|(_, p)| p.action == EnumPlanAction::Copy)
        );
        assert!(l_plan.iter().all(|p| p.status == EnumPlanStatus::Pending));
    }

    #[test]
    fn plan_with_no_destinations_is_empty() {
        let l_renames = compute_rename_map(&[PathBuf::from("/s/!a")], "s");
        let l_dsts: Vec<PathBuf> = Vec::new();
        assert!(plan_operations(&l_renames, &l_dsts).is_empty());
    }
}
