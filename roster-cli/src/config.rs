//! Dashboard configuration

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use roster_capture::CaptureSettings;
use roster_directory::DirectoryConfig;

use crate::auth::{Credentials, StaticCredentials};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub capture: CaptureSettings,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Credentials accepted at the login gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_password")]
    pub password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: default_password(),
        }
    }
}

impl AuthConfig {
    pub fn authenticator(&self) -> StaticCredentials {
        StaticCredentials::new(Credentials::new(&self.username, &self.password))
    }
}

/// Synthetic camera resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

// Defaults
fn default_username() -> String { "test".to_string() }
fn default_password() -> String { "123456".to_string() }
fn default_width() -> u32 { 640 }
fn default_height() -> u32 { 480 }

impl RosterConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load `path`, or defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = RosterConfig::from_toml("").unwrap();
        assert_eq!(config.directory.timeout_ms, 5000);
        assert_eq!(config.capture, CaptureSettings::default());
        assert_eq!(config.auth.username, "test");
        assert_eq!(config.camera.width, 640);
    }

    #[test]
    fn test_partial_sections() {
        let config = RosterConfig::from_toml(
            r#"
[directory]
endpoint = "http://localhost:9000/table"
timeout_ms = 1500

[capture]
shutter_ms = 750
"#,
        )
        .unwrap();

        assert_eq!(config.directory.endpoint, "http://localhost:9000/table");
        assert_eq!(config.directory.timeout_ms, 1500);
        assert_eq!(config.directory.username, "test");
        assert_eq!(config.capture.shutter_ms, 750);
        assert_eq!(config.capture.contrast, 1.1);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(matches!(
            RosterConfig::from_toml("[directory\ntimeout_ms = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = RosterConfig::load("/nonexistent/roster.toml").unwrap();
        assert_eq!(config.auth.password, "123456");
    }
}
