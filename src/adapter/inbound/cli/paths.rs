//! Path utilities for sprinkle.
//!
//! The config file is looked up in this order:
//! - the `--config` path, when given
//! - `./sprinkle.toml`
//! - `~/.sprinkle/config.toml`

use std::path::{Path, PathBuf};

/// Config file name looked up in the working directory.
pub const LOCAL_CONFIG: &str = "sprinkle.toml";

/// Returns the sprinkle home directory (`~/.sprinkle/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".sprinkle")
}

/// Returns the default config file path (`~/.sprinkle/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Resolve which config file to read, if any.
///
/// An explicit path is returned even when it does not exist so the read error
/// reaches the user. Otherwise the first existing default wins.
pub fn resolve_config(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    [PathBuf::from(LOCAL_CONFIG), default_config()]
        .into_iter()
        .find(|p| p.is_file())
}
