//! Configuration System
//!
//! Backend location, camera capture settings and logging. The defaults are
//! what the browser build uses; native builds can also load a TOML file and
//! apply environment variable overrides.

use serde::Deserialize;
#[cfg(feature = "native")]
use std::path::{Path, PathBuf};

use crate::camera::CaptureSettings;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub camera: CaptureSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the recipe backend lives
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BackendConfig {
    #[serde(default = "default_protocol")]
    pub protocol: String,

    #[serde(default = "default_hostname")]
    pub hostname: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Full base URL; takes precedence over protocol/hostname/port
    #[serde(default)]
    pub url: Option<String>,

    /// No timeout unless set
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_protocol() -> String {
    "http".to_string()
}

fn default_hostname() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    80
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            protocol: default_protocol(),
            hostname: default_hostname(),
            port: default_port(),
            url: None,
            request_timeout_secs: None,
        }
    }
}

impl BackendConfig {
    /// `protocol://hostname:port`, without a trailing slash
    pub fn base_url(&self) -> String {
        match &self.url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("{}://{}:{}", self.protocol, self.hostname, self.port),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[cfg(feature = "native")]
impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("dishchat").join("config.toml")),
            Some(PathBuf::from("./dishchat.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("DISHCHAT_BACKEND_URL") {
            self.backend.url = Some(url);
        }

        if let Ok(level) = std::env::var("DISHCHAT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("DISHCHAT_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[cfg(feature = "native")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Dishchat Configuration
#
# Environment variables override these settings:
# - DISHCHAT_BACKEND_URL
# - DISHCHAT_LOG_LEVEL
# - DISHCHAT_LOG_FORMAT

[backend]
protocol = "http"
hostname = "localhost"
port = 80

# Full base URL, overrides the three fields above
# url = "https://recipes.example.com"

# Request timeout in seconds (unset = wait forever)
# request_timeout_secs = 60

[camera]
# environment (rear) or user (front)
facing_mode = "environment"

# Frame size used when the camera does not report one
fallback_width = 1280
fallback_height = 720

# JPEG quality between 0 and 1
jpeg_quality = 0.92

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty or json
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        assert_eq!(BackendConfig::default().base_url(), "http://localhost:80");
    }

    #[test]
    fn test_url_override_trims_slash() {
        let backend = BackendConfig {
            url: Some("https://recipes.example.com/".to_string()),
            ..BackendConfig::default()
        };
        assert_eq!(backend.base_url(), "https://recipes.example.com");
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[backend]\nport = 8080\n\n[camera]\nfacing_mode = \"user\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.backend.base_url(), "http://localhost:8080");
        assert_eq!(config.camera.facing_mode, crate::camera::FacingMode::User);
        assert_eq!(config.camera.fallback_width, 1280);
        assert_eq!(config.logging.level, "info");
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[backend\n").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
        assert!(matches!(
            Config::load(&dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
