use crate::ddl::Capabilities;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub dialect: DialectSettings,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DatabaseConfig {
    pub connection_string: Option<String>,
}

/// Dialect selection plus per-capability overrides. Unset overrides keep
/// whatever the dialect declares.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DialectSettings {
    pub name: Option<String>,
    pub supports_views: Option<bool>,
    pub supports_materialized_views: Option<bool>,
    pub supports_functions: Option<bool>,
    pub supports_view_columns_definition: Option<bool>,
}

/// Unset values fall back to their defaults when read, so an overlay file
/// that never mentions them leaves the base file's values alone.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BehaviorConfig {
    pub default_dry_run: Option<bool>,
}

const DEFAULT_LOG_LEVEL: &str = "info";

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

impl BehaviorConfig {
    pub fn default_dry_run(&self) -> bool {
        self.default_dry_run.unwrap_or(false)
    }
}

impl DialectSettings {
    /// Apply the configured overrides on top of a dialect's capabilities
    pub fn apply(&self, mut capabilities: Capabilities) -> Capabilities {
        if let Some(v) = self.supports_views {
            capabilities.views = v;
        }
        if let Some(v) = self.supports_materialized_views {
            capabilities.materialized_views = v;
        }
        if let Some(v) = self.supports_functions {
            capabilities.functions = v;
        }
        if let Some(v) = self.supports_view_columns_definition {
            capabilities.view_columns_definition = v;
        }
        capabilities
    }
}

impl Config {
    /// Load configuration from file with environment override support
    pub fn load(config_path: Option<&str>, environment: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Load base configuration file
        if let Some(path) = config_path {
            config = Self::load_from_file(path)?;
        } else {
            // Try loading from standard locations
            for standard_path in Self::standard_config_paths() {
                if standard_path.exists() {
                    debug!("Loading config from: {}", standard_path.display());
                    config = Self::load_from_file(&standard_path.to_string_lossy())?;
                    break;
                }
            }
        }

        // Load environment-specific overrides
        if let Some(env) = environment {
            if let Some(env_config) = Self::load_environment_config(env)? {
                debug!("Applying environment config for: {}", env);
                config = config.merge(env_config);
            }
        }

        // Load local overrides (always last)
        if let Some(local_config) = Self::load_overlay("config/local.toml")? {
            debug!("Applying local config overrides");
            config = config.merge(local_config);
        }

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_string(), e.to_string()))
    }

    /// Load environment-specific configuration
    fn load_environment_config(environment: &str) -> Result<Option<Self>, ConfigError> {
        let env_path = format!("config/{}.toml", environment);
        Self::load_overlay(&env_path)
    }

    /// A missing overlay is skipped; a malformed one is an error.
    fn load_overlay(path: &str) -> Result<Option<Self>, ConfigError> {
        match Self::load_from_file(path) {
            Ok(config) => Ok(Some(config)),
            Err(ConfigError::FileRead(_, reason)) => {
                debug!("Skipping config overlay {}: {}", path, reason);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Get standard configuration file paths in order of precedence
    fn standard_config_paths() -> Vec<PathBuf> {
        vec![
            PathBuf::from("config.toml"),
            PathBuf::from("config/default.toml"),
        ]
    }

    /// Merge this config with another, with the other taking precedence.
    /// Optional values only override when set.
    pub fn merge(mut self, other: Self) -> Self {
        if other.database.connection_string.is_some() {
            self.database.connection_string = other.database.connection_string;
        }

        let dialect = other.dialect;
        if dialect.name.is_some() {
            self.dialect.name = dialect.name;
        }
        self.dialect.supports_views = dialect.supports_views.or(self.dialect.supports_views);
        self.dialect.supports_materialized_views = dialect
            .supports_materialized_views
            .or(self.dialect.supports_materialized_views);
        self.dialect.supports_functions =
            dialect.supports_functions.or(self.dialect.supports_functions);
        self.dialect.supports_view_columns_definition = dialect
            .supports_view_columns_definition
            .or(self.dialect.supports_view_columns_definition);

        self.logging.level = other.logging.level.or(self.logging.level);
        self.behavior.default_dry_run = other
            .behavior
            .default_dry_run
            .or(self.behavior.default_dry_run);

        self
    }

    /// Defaults spelled out, as written by `generate_default_config`
    fn template() -> Self {
        Config {
            logging: LoggingConfig {
                level: Some(DEFAULT_LOG_LEVEL.to_string()),
            },
            behavior: BehaviorConfig {
                default_dry_run: Some(false),
            },
            ..Config::default()
        }
    }

    /// Generate a default configuration file
    pub fn generate_default_config(path: &str) -> Result<(), ConfigError> {
        let config = Config::template();
        let toml_content =
            toml::to_string_pretty(&config).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, toml_content)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}': {1}")]
    FileRead(String, String),

    #[error("Failed to parse config file '{0}': {1}")]
    Parse(String, String),

    #[error("Failed to write config file '{0}': {1}")]
    FileWrite(String, String),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),
}
