// Preference path utilities.
// Locates the per-user configuration directory.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Get the base config directory (~/.config/gh-focus on Linux).
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "gh-focus").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Path to the preferences file.
pub fn preferences_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("preferences.json"))
}
