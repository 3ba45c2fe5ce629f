//! `bang_copier_conf` v1:
//! JSON config store for bang-copier.
//!
//! - `conf`  : constants and default path factories
//! - `spec`  : validated config model, log formats, errors
//! - `store` : load/validate/save and destination management
//! - `util`  : path expansion and resolution

pub mod conf;
pub mod spec;
pub mod store;
pub mod util;

pub use conf::{
    C_DIR_LOG_FALLBACK, C_PATH_CONFIG_REL, TUP_LOG_FORMATS_DEFAULT, derive_default_config_path,
    derive_fallback_log_dir,
};
pub use spec::{ConfError, EnumLogFormat, SpecConfig};
pub use store::{
    add_destination, clear_destinations, list_destinations, load, load_or_create,
    remove_destination, resolve_log_dir, resolve_log_dir_path, save, validate,
};
pub use util::{expand_user, resolve_absolute_path, resolve_user_path};
