//! Configuration loading.

use pulseboard_core::config::AppConfig;
use pulseboard_core::{PulseError, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths::PulsePaths;

/// Loads [`AppConfig`] from a TOML file.
///
/// Responsibilities:
/// - Locate `config.toml` (explicit path or platform default)
/// - Parse TOML into the domain config model
///
/// Does NOT:
/// - Write or modify the config file
/// - Validate the demo account against anything
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Creates a service reading the default `~/.config/pulseboard/config.toml`.
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: PulsePaths::config_file()?,
        })
    }

    /// Creates a service reading a custom path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration.
    ///
    /// # Returns
    ///
    /// - `Ok(AppConfig)`: Parsed config, or defaults if the file is missing or empty
    /// - `Err(PulseError::Config)`: The file exists but cannot be read or parsed
    pub fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            tracing::debug!(
                "[ConfigService] No config at {:?}, using defaults",
                self.path
            );
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            PulseError::config(format!(
                "Failed to read config file at {:?}: {}",
                self.path, e
            ))
        })?;

        if content.trim().is_empty() {
            return Ok(AppConfig::default());
        }

        toml::from_str(&content).map_err(|e| {
            PulseError::config(format!(
                "Failed to parse TOML from {:?}: {}",
                self.path, e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));
        assert_eq!(service.load().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "\n").unwrap();

        let service = ConfigService::with_path(path);
        assert_eq!(service.load().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[auth]
username = "ops"
password = "s3cret"
delay_ms = 10

[dashboard]
fetch_delay_ms = 20

[storage]
path = "/tmp/pulse-session.json"

[logging]
level = "debug"
"#,
        )
        .unwrap();

        let config = ConfigService::with_path(path).load().unwrap();
        assert_eq!(config.auth.username, "ops");
        assert_eq!(config.auth.delay(), Duration::from_millis(10));
        assert_eq!(config.dashboard.fetch_delay(), Duration::from_millis(20));
        assert_eq!(config.dashboard.refresh_delay(), Duration::from_millis(300));
        assert_eq!(
            config.storage.path,
            Some(PathBuf::from("/tmp/pulse-session.json"))
        );
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[auth\nusername = ").unwrap();

        let err = ConfigService::with_path(path).load().unwrap_err();
        assert!(err.is_config());
    }
}
