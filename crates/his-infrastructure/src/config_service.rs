//! Configuration service implementation.
//!
//! Loads the client configuration from `~/.config/his/config.toml`.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use his_core::config::ClientConfig;
use his_core::error::Result;

use crate::paths::HisPaths;

/// Environment variable that overrides `api.base_url`.
pub const API_BASE_URL_ENV: &str = "HIS_API_BASE_URL";

/// Loads and caches the client configuration.
///
/// A missing or empty file yields the defaults. A file that exists but does
/// not parse is an error, so a typo never silently points the client at the
/// default server.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    /// Uses the platform config path.
    pub fn new() -> Self {
        Self {
            path: HisPaths::config_file().ok(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Uses an explicit config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<ClientConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let mut loaded = match &self.path {
            Some(path) => Self::load_file(path)?,
            None => {
                tracing::warn!("[Config] No config directory available, using defaults");
                ClientConfig::default()
            }
        };
        Self::apply_env_overrides(&mut loaded, std::env::var(API_BASE_URL_ENV).ok());

        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    fn load_file(path: &Path) -> Result<ClientConfig> {
        if !path.exists() {
            tracing::info!("[Config] {:?} not found, using defaults", path);
            return Ok(ClientConfig::default());
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(ClientConfig::default());
        }

        let config: ClientConfig = toml::from_str(&content)?;
        tracing::info!("[Config] Loaded {:?}", path);
        Ok(config)
    }

    fn apply_env_overrides(config: &mut ClientConfig, base_url: Option<String>) {
        if let Some(base_url) = base_url.filter(|url| !url.trim().is_empty()) {
            tracing::info!("[Config] {} overrides api.base_url", API_BASE_URL_ENV);
            config.api.base_url = base_url;
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use his_core::GateScope;
    use his_core::config::DEFAULT_API_BASE_URL;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigService::load_file(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "  \n").unwrap();

        let config = ConfigService::load_file(&path).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_loads_sections_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[api]
base_url = "http://localhost:9000/records"

[authorization]
gate_scope = "all-mutations"
"#,
        )
        .unwrap();

        let config = ConfigService::load_file(&path).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:9000/records");
        assert_eq!(config.authorization.gate_scope, GateScope::AllMutations);
        assert!(config.admin.error_replies);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = 3").unwrap();

        let err = ConfigService::load_file(&path).unwrap_err();
        assert!(matches!(err, his_core::HisError::Serialization { .. }));
    }

    #[test]
    fn test_env_override_replaces_base_url() {
        let mut config = ClientConfig::default();
        ConfigService::apply_env_overrides(&mut config, Some("http://override".into()));
        assert_eq!(config.api.base_url, "http://override");

        let mut config = ClientConfig::default();
        ConfigService::apply_env_overrides(&mut config, Some("  ".into()));
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_get_config_caches_until_invalidated() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();
        let service = ConfigService::with_path(&path);

        assert_eq!(service.get_config().unwrap().logging.level, "debug");

        std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();
        assert_eq!(service.get_config().unwrap().logging.level, "debug");

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().logging.level, "warn");
    }
}
