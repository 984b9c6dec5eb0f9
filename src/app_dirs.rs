use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Run history lands in the XDG state directory, `~/.local/state/tysh`.
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("tysh");
            Some(state_dir.join("runs.csv"))
        } else {
            ProjectDirs::from("", "", "tysh")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("runs.csv"))
        }
    }

    /// Saved settings live under `~/.config/tysh`.
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let config_dir = PathBuf::from(home).join(".config").join("tysh");
            Some(config_dir.join("config.json"))
        } else {
            ProjectDirs::from("", "", "tysh")
                .map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
        }
    }
}
