//! # Configuration Settings
//!
//! Defines the configuration structure for the schema provisioner.

use crate::errors::{ProvisionError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use validator::Validate;

/// Configuration key used when a caller names no database
pub const DEFAULT_DATABASE_KEY: &str = "default";

/// Main provisioner configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ProvisionerConfig {
    /// Databases addressable by configuration key
    pub databases: HashMap<String, DatabaseConfig>,

    /// Key used when an operation names no database
    #[validate(length(min = 1, message = "Default database key cannot be empty"))]
    pub default_database: String,

    /// Script resource configuration
    #[validate(nested)]
    pub scripts: ScriptsConfig,

    /// Logging configuration
    #[validate(nested)]
    pub observability: ObservabilityConfig,
}

impl Default for ProvisionerConfig {
    fn default() -> Self {
        Self {
            databases: HashMap::new(),
            default_database: DEFAULT_DATABASE_KEY.to_string(),
            scripts: ScriptsConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl ProvisionerConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(ProvisionError::from)?;

        for (key, database) in &self.databases {
            if key.trim().is_empty() {
                return Err(ProvisionError::validation("Database keys cannot be empty"));
            }
            Validate::validate(database).map_err(|e| match ProvisionError::from(e) {
                ProvisionError::Validation { message, .. } => {
                    ProvisionError::validation_field(message, format!("databases.{}", key))
                }
                other => other,
            })?;
        }

        if !self.databases.is_empty() && !self.databases.contains_key(&self.default_database) {
            return Err(ProvisionError::validation_field(
                format!("Default database '{}' is not configured", self.default_database),
                "default_database",
            ));
        }

        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ProvisionError::io(e, format!("Failed to read config file: {}", path.display()))
        })?;

        let config: Self = toml::from_str(&contents).map_err(|e| {
            ProvisionError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                Box::new(e),
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from environment variables
    ///
    /// `SCHEMA_DATABASE_URL` configures a single database under the default key.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay environment variables on top of already loaded settings
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(key) = std::env::var("SCHEMA_DEFAULT_DATABASE") {
            self.default_database = key;
        }

        if let Ok(url) = std::env::var("SCHEMA_DATABASE_URL") {
            let profile = std::env::var("SCHEMA_DATABASE_PROFILE").ok();
            let database = self
                .databases
                .entry(self.default_database.clone())
                .or_insert_with(|| DatabaseConfig::new(url.clone()));
            database.url = url;
            if profile.is_some() {
                database.profile = profile;
            }
        }

        if let Ok(timeout) = std::env::var("SCHEMA_CONNECT_TIMEOUT_SECONDS") {
            let seconds = timeout.parse::<u64>().map_err(|e| {
                ProvisionError::config(format!("Invalid SCHEMA_CONNECT_TIMEOUT_SECONDS: {}", e))
            })?;
            for database in self.databases.values_mut() {
                database.connect_timeout_seconds = seconds;
            }
        }

        if let Ok(dir) = std::env::var("SCHEMA_SCRIPTS_DIR") {
            self.scripts.directory = Some(PathBuf::from(dir));
        }

        if let Ok(level) = std::env::var("SCHEMA_LOG_LEVEL") {
            self.observability.log_level = level;
        }

        if let Ok(json) = std::env::var("SCHEMA_JSON_LOGGING") {
            self.observability.json_logging = json.to_lowercase() == "true" || json == "1";
        }

        Ok(())
    }

    /// Look up a database by configuration key
    pub fn database(&self, key: &str) -> Result<&DatabaseConfig> {
        self.databases.get(key).ok_or_else(|| ProvisionError::unknown_database(key))
    }
}

/// Connection settings for one named database
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[validate(length(min = 1, message = "Database URL cannot be empty"))]
    pub url: String,

    /// Connection profile identifier; derived from the URL scheme when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout_seconds")]
    #[validate(range(
        min = 1,
        max = 300,
        message = "Connect timeout must be between 1 and 300 seconds"
    ))]
    pub connect_timeout_seconds: u64,
}

fn default_connect_timeout_seconds() -> u64 {
    10
}

impl DatabaseConfig {
    /// Create a database configuration for a URL with default settings
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self {
            url: url.into(),
            profile: None,
            connect_timeout_seconds: default_connect_timeout_seconds(),
        }
    }

    /// Set an explicit connection profile
    pub fn with_profile<S: Into<String>>(mut self, profile: S) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Get connection timeout as Duration
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// The connection profile identifier for this database.
    ///
    /// An explicit `profile` wins; otherwise the URL scheme is used, looking through a
    /// leading `jdbc:` so `jdbc:h2:mem:test` yields `h2`.
    pub fn profile(&self) -> Option<String> {
        if let Some(profile) = &self.profile {
            return Some(profile.clone());
        }

        let url = self.url.trim();
        let url = url.strip_prefix("jdbc:").unwrap_or(url);
        if let Ok(parsed) = url::Url::parse(url) {
            return Some(parsed.scheme().to_string());
        }
        url.split_once(':').map(|(scheme, _)| scheme.to_string())
    }
}

/// Where script resources are loaded from
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ScriptsConfig {
    /// Directory holding `schema/<dialect>/…` scripts; bundled scripts are used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Enable JSON structured logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logging: false,
        }
    }
}
