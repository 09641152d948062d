//! Helper utilities for config loader path handling.

use directories::UserDirs;
use std::path::PathBuf;

/// Environment variable overriding the default config location.
pub(super) const DEFAULT_CONFIG_ENV: &str = "POLLINATOR_DEFAULT_CONFIG";
/// Default config directory under the home directory.
const DEFAULT_CONFIG_DIR: &str = ".pollinator";
/// Default config filename.
const DEFAULT_CONFIG_FILE: &str = "default_config.json";

/// Default config compiled into the crate, used when no file is configured.
pub(super) const BUNDLED_DEFAULT_CONFIG: &str = include_str!("../../defaults/default_config.json");

/// Resolve the process-wide default config path.
///
/// An explicit `POLLINATOR_DEFAULT_CONFIG` always wins. The home directory
/// location is only used when the file exists there; otherwise `None` selects
/// the bundled defaults.
pub(super) fn default_config_path() -> Option<PathBuf> {
    match std::env::var_os(DEFAULT_CONFIG_ENV) {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => UserDirs::new()
            .map(|dirs| {
                dirs.home_dir()
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILE)
            })
            .filter(|path| path.is_file()),
    }
}
