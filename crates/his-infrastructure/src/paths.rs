//! Platform paths for HIS client files.
//!
//! ```text
//! ~/.config/his/          # Config directory
//! └── config.toml         # Client configuration
//!
//! ~/.local/share/his/     # Data directory
//! └── logs/               # Rolling log files
//!     └── his-desktop.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

use his_core::HisError;
use his_core::error::Result;

const APP_DIR: &str = "his";

pub struct HisPaths;

impl HisPaths {
    /// Returns the HIS configuration directory (e.g. `~/.config/his/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| HisError::config("Cannot find config directory"))
    }

    /// Returns the path of `config.toml`.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the log directory, falling back to the config directory on
    /// platforms without a data directory.
    pub fn logs_dir() -> Result<PathBuf> {
        let base = match dirs::data_local_dir() {
            Some(dir) => dir.join(APP_DIR),
            None => Self::config_dir()?,
        };
        Ok(base.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_lives_in_app_dir() {
        if let Ok(path) = HisPaths::config_file() {
            assert!(path.ends_with("his/config.toml"));
        }
    }

    #[test]
    fn test_logs_dir_name() {
        if let Ok(path) = HisPaths::logs_dir() {
            assert!(path.ends_with("logs"));
        }
    }
}
