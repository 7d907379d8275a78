//! Host platform (linux for example) utility functions

use std::path::PathBuf;

use uname;

/// Environment variable pointing at the root of the planner's software directory.
pub const SW_ROOT_ENV_VAR: &str = "DUBINS_SW_ROOT";

/// Retrieve uname information.
pub fn get_uname() -> std::io::Result<uname::Info> {
    uname::uname()
}

/// Get the software root directory.
///
/// This is the value of `DUBINS_SW_ROOT` if it is set, otherwise the current working directory.
/// The `params` and `sessions` directories are resolved relative to this path.
pub fn get_sw_root() -> std::io::Result<PathBuf> {
    match std::env::var_os(SW_ROOT_ENV_VAR) {
        Some(root) => Ok(PathBuf::from(root)),
        None => std::env::current_dir(),
    }
}
