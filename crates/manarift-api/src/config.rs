//! Configuration loading and typed config structures for the game API.
//!
//! The canonical configuration lives in `manarift.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure and provides a loader that reads the file and applies
//! environment-variable overrides for infrastructure values. A missing
//! file is not an error: every field has a development default.

use std::path::Path;

use serde::Deserialize;

/// Default configuration file name, resolved against the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "manarift.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level API configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Infrastructure connection strings.
    #[serde(default)]
    pub infrastructure: InfrastructureConfig,

    /// Rules-engine process settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Card catalog settings.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl ApiConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override file values:
    /// - `PORT` overrides `server.port`
    /// - `REDIS_URL` overrides `infrastructure.redis_url`
    /// - `ENGINE_COMMAND` overrides `engine.command`
    /// - `ENGINE_SCRIPT` overrides `engine.script`
    /// - `CATALOG_PATH` overrides `catalog.path`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load `manarift.yaml` when present, defaults otherwise. Environment
    /// overrides apply in both cases.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] only when a config file exists but cannot
    /// be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::from_file(path)
        } else {
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(port) = std::env::var("PORT")
            && let Ok(parsed) = port.parse::<u16>()
        {
            self.server.port = parsed;
        }
        if let Ok(url) = std::env::var("REDIS_URL") {
            self.infrastructure.redis_url = Some(url);
        }
        if let Ok(command) = std::env::var("ENGINE_COMMAND") {
            self.engine.command = command;
        }
        if let Ok(script) = std::env::var("ENGINE_SCRIPT") {
            self.engine.script = script;
        }
        if let Ok(path) = std::env::var("CATALOG_PATH") {
            self.catalog.path = path;
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// The host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
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

/// Infrastructure connection configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InfrastructureConfig {
    /// Redis connection URL. When unset the API falls back to the
    /// in-memory session cache.
    #[serde(default)]
    pub redis_url: Option<String>,
}

/// Rules-engine process configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Interpreter command (e.g. `lua`, `lua5.4`).
    #[serde(default = "default_engine_command")]
    pub command: String,

    /// Path to the engine entry script.
    #[serde(default = "default_engine_script")]
    pub script: String,

    /// Extra arguments passed after the script path.
    #[serde(default)]
    pub args: Vec<String>,

    /// Working directory for the engine process. Defaults to the engine
    /// package root derived from the script path.
    #[serde(default)]
    pub cwd: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command: default_engine_command(),
            script: default_engine_script(),
            args: Vec::new(),
            cwd: None,
        }
    }
}

/// Card catalog configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogConfig {
    /// Path to the catalog JSON file.
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
        }
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    3001
}

fn default_engine_command() -> String {
    String::from("lua")
}

fn default_engine_script() -> String {
    String::from("engine/src/main.lua")
}

fn default_catalog_path() -> String {
    String::from("data/cards.json")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_development_setup() {
        let config = ApiConfig::default();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.infrastructure.redis_url, None);
        assert_eq!(config.engine.command, "lua");
        assert_eq!(config.catalog.path, "data/cards.json");
    }

    #[test]
    fn yaml_values_override_defaults() {
        let yaml = r"
server:
  port: 8088
infrastructure:
  redis_url: redis://cache:6379
engine:
  command: lua5.4
  script: /opt/engine/main.lua
";
        let config = ApiConfig::parse(yaml).unwrap();
        assert_eq!(config.server.port, 8088);
        assert_eq!(
            config.infrastructure.redis_url.as_deref(),
            Some("redis://cache:6379")
        );
        assert_eq!(config.engine.command, "lua5.4");
        // Unspecified sections keep their defaults.
        assert_eq!(config.catalog.path, "data/cards.json");
    }

    #[test]
    fn partial_yaml_is_accepted() {
        let config = ApiConfig::parse("server:\n  host: 127.0.0.1\n").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3001);
    }

    #[test]
    fn invalid_yaml_is_rejected() {
        assert!(ApiConfig::parse("server: [not-a-map").is_err());
    }
}
