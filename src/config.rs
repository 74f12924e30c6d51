//! Application configuration
//!
//! TOML-backed settings for the engine windows, the HTTP server, and
//! logging. The default location is the platform config directory
//! (`~/.config/readyrs/config.toml` on Linux); a missing file simply
//! yields the defaults.

use crate::acwr::AcwrConfig;
use crate::error::{ReadyRsError, Result};
use crate::logging::LogConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerSettings,

    /// ACWR window settings
    pub acwr: AcwrConfig,

    /// Logging settings
    pub log: LogConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Bind host
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Comma-separated CORS origin allowlist; "*" allows any origin
    pub cors_allowed_origins: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors_allowed_origins: "*".to_string(),
        }
    }
}

impl AppConfig {
    /// Default configuration file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("readyrs")
            .join("config.toml")
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| {
            ReadyRsError::Configuration(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Load from the given path (or the default), falling back to
    /// defaults when no file exists
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_path);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ReadyRsError::Configuration(format!("failed to serialize: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Bind address string for the HTTP server
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
