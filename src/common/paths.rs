//! Configuration and asset paths
//!
//! Linux: `~/.config/platform-smoke/`
//! macOS: `~/Library/Application Support/platform-smoke/`
//! Windows: `%APPDATA%\platform-smoke\`

use std::path::PathBuf;

/// Name used for the configuration directory
const APP_NAME: &str = "platform-smoke";

/// Get the configuration directory path
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the default configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Directory holding the running executable
///
/// Relative mTLS material is looked up here when no config file was
/// loaded, so certificates can ship next to the binary.
pub fn executable_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()))
}
