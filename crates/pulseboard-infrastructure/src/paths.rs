//! Path management for pulseboard files.
//!
//! ```text
//! ~/.config/pulseboard/        # Config directory (platform equivalent elsewhere)
//! ├── config.toml              # Application configuration
//! └── session.json             # Durable session storage (token, user)
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "pulseboard";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for pulseboard_core::PulseError {
    fn from(err: PathError) -> Self {
        pulseboard_core::PulseError::config(err.to_string())
    }
}

/// Resolves platform-specific locations of pulseboard files.
pub struct PulsePaths;

impl PulsePaths {
    /// Returns the pulseboard configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: e.g. `~/.config/pulseboard/`
    /// - `Err(PathError::ConfigDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the durable session file.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_is_under_config_dir() {
        let Ok(config_dir) = PulsePaths::config_dir() else {
            return;
        };
        assert!(config_dir.ends_with(APP_DIR));

        let config_file = PulsePaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        assert!(config_file.starts_with(&config_dir));
    }

    #[test]
    fn test_session_file_is_under_config_dir() {
        let Ok(config_dir) = PulsePaths::config_dir() else {
            return;
        };
        let session_file = PulsePaths::session_file().unwrap();
        assert!(session_file.ends_with("session.json"));
        assert!(session_file.starts_with(&config_dir));
    }
}
