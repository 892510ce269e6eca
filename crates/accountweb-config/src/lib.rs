//! Configuration management for accountweb
//!
//! This module handles loading, validation, and management of
//! accountweb configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Remote Accounts API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountsApiConfig {
    /// Base URL of the account collection, e.g. `http://localhost:5000/accounts`
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for AccountsApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000/accounts".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Accounts API settings
    #[serde(default)]
    pub accounts_api: AccountsApiConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            });
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|_| ConfigError::IoError)?;

        Self::parse(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn parse(content: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|_| ConfigError::InvalidYaml)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        let base_url = self.accounts_api.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "accounts_api.base_url".to_string(),
            });
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "accounts_api.base_url".to_string(),
                reason: "Base URL must start with http:// or https://".to_string(),
            });
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                reason: format!("Log level must be one of: {}", LOG_LEVELS.join(", ")),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigErrorCode;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = Config::parse("{}").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.accounts_api.base_url, "http://localhost:5000/accounts");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_sections_keep_field_defaults() {
        let config = Config::parse("server:\n  port: 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
    }

    #[test]
    fn test_bundled_template_is_valid() {
        let config = Config::parse(Config::generate_default()).unwrap();
        assert_eq!(config.accounts_api.base_url, "http://localhost:5000/accounts");
    }

    #[test]
    fn test_zero_port_rejected() {
        let error = Config::parse("server:\n  port: 0\n").unwrap_err();
        assert_eq!(error.code(), ConfigErrorCode::InvalidValue);
        assert!(error.to_string().contains("server.port"));
    }

    #[test]
    fn test_base_url_scheme_required() {
        let error = Config::parse("accounts_api:\n  base_url: localhost:5000/accounts\n").unwrap_err();
        assert_eq!(error.code(), ConfigErrorCode::InvalidValue);

        let error = Config::parse("accounts_api:\n  base_url: ''\n").unwrap_err();
        assert_eq!(error.code(), ConfigErrorCode::MissingField);
    }

    #[test]
    fn test_unknown_log_level_rejected() {
        let error = Config::parse("logging:\n  level: loud\n").unwrap_err();
        assert!(error.to_string().contains("logging.level"));
    }

    #[test]
    fn test_invalid_yaml() {
        let error = Config::parse("server: [").unwrap_err();
        assert_eq!(error.code(), ConfigErrorCode::InvalidYaml);
    }

    #[test]
    fn test_missing_file() {
        let error = Config::load(PathBuf::from("/nonexistent/accountweb.yaml")).unwrap_err();
        assert_eq!(error.code(), ConfigErrorCode::FileNotFound);
    }
}
