//! Discovery and creation of the `.cotiza/` project directory.
//!
//! The directory holds the project's `config.yaml` and, by default, its
//! catalog.

use crate::config::ConfigError;
use std::path::{Path, PathBuf};

/// The name of the project directory.
pub const COTIZA_DIR_NAME: &str = ".cotiza";

/// Environment variable that overrides the directory walk.
pub const COTIZA_DIR_ENV: &str = "COTIZA_DIR";

/// Walk up from `start` looking for a `.cotiza/` directory.
///
/// `COTIZA_DIR` wins when it names an existing directory. Returns `None`
/// when the filesystem root is reached.
pub fn find_cotiza_dir(start: &Path) -> Option<PathBuf> {
    if let Ok(env_dir) = std::env::var(COTIZA_DIR_ENV) {
        let env_path = PathBuf::from(env_dir);
        if env_path.is_dir() {
            return Some(env_path);
        }
    }

    let start = start.canonicalize().ok()?;
    start
        .ancestors()
        .map(|dir| dir.join(COTIZA_DIR_NAME))
        .find(|candidate| candidate.is_dir())
}

/// Create `.cotiza/` under `path` (or `path` itself if it is already named
/// `.cotiza`) and return it.
pub fn ensure_cotiza_dir(path: &Path) -> Result<PathBuf, ConfigError> {
    let dir = if path.ends_with(COTIZA_DIR_NAME) {
        path.to_path_buf()
    } else {
        path.join(COTIZA_DIR_NAME)
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
