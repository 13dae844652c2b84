//! Configuration file locations
//!
//! Uses the directories crate for platform-appropriate locations:
//! - Linux: `~/.config/synthcheck/`
//! - macOS: `~/Library/Application Support/synthcheck/`
//! - Windows: `%APPDATA%\synthcheck\`

use std::path::PathBuf;

const PROJECT_NAME: &str = "synthcheck";

/// Get the configuration directory path
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", PROJECT_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
///
/// `SYNTHCHECK_CONFIG` overrides the platform default, which keeps tests
/// hermetic and lets CI point at a checked-in config.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("SYNTHCHECK_CONFIG") {
        return Some(PathBuf::from(path));
    }
    config_dir().map(|dir| dir.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir_is_valid() {
        let dir = config_dir();
        assert!(dir.is_some());
    }
}
