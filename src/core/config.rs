use crate::core::currency::Direction;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_PRIMARY_URL: &str = "https://open.er-api.com";
pub const DEFAULT_BACKUP_URL: &str = "https://api.exchangerate.host";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    #[serde(default = "default_primary")]
    pub primary: ProviderConfig,
    #[serde(default = "default_backup")]
    pub backup: ProviderConfig,
}

fn default_primary() -> ProviderConfig {
    ProviderConfig {
        base_url: DEFAULT_PRIMARY_URL.to_string(),
    }
}

fn default_backup() -> ProviderConfig {
    ProviderConfig {
        base_url: DEFAULT_BACKUP_URL.to_string(),
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            primary: default_primary(),
            backup: default_backup(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub direction: Direction,
    /// Request timeout in seconds; the HTTP client default applies when unset.
    pub timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Loads the config from the default location, falling back to built-in
    /// defaults when no file exists there.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "yenconv", "yenconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
providers:
  primary:
    base_url: "http://example.com/primary"
  backup:
    base_url: "http://example.com/backup"
direction: "USD_TO_JPY"
timeout_secs: 5
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.providers.primary.base_url, "http://example.com/primary");
        assert_eq!(config.providers.backup.base_url, "http://example.com/backup");
        assert_eq!(config.direction, Direction::UsdToJpy);
        assert_eq!(config.timeout_secs, Some(5));
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config.providers.primary.base_url, DEFAULT_PRIMARY_URL);
        assert_eq!(config.providers.backup.base_url, DEFAULT_BACKUP_URL);
        assert_eq!(config.direction, Direction::JpyToUsd);
        assert!(config.timeout_secs.is_none());

        let partial = r#"
providers:
  backup:
    base_url: "http://localhost:9000"
"#;
        let config: AppConfig = serde_yaml::from_str(partial).expect("Failed to deserialize");
        assert_eq!(config.providers.primary.base_url, DEFAULT_PRIMARY_URL);
        assert_eq!(config.providers.backup.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_load_from_path_reports_parse_errors() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "direction: SIDEWAYS").unwrap();

        let err = AppConfig::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
