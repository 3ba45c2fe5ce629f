//! `bang_copier_io_fs` v1:
//! Marker-file scan, rename/copy planning and plan execution.
//!
//! - `scan`   : top-level marker-file listing
//! - `plan`   : rename map and per-destination plan
//! - `copy`   : copy strategies and plan executor
//! - `spec`   : enums/models/errors
//! - `report` : run-time report model
//! - `util`   : shared helper functions

pub mod copy;
pub mod plan;
pub mod report;
pub mod scan;
pub mod spec;
mod util;

pub use copy::{CopyStrategy, DittoCopyStrategy, StdCopyStrategy, execute_plan, select_copy_strategy};
pub use plan::{compute_rename_map, plan_operations};
pub use report::{ReportRun, ReportRunBuilder, SpecRunError};
pub use scan::{C_MARKER, is_marker_name, scan_marker_files};
pub use spec::{
    CopyError, EnumPlanAction, EnumPlanStatus, ScanError, SpecPlanEntry, SpecRenameEntry,
};
