//! # Configuration Management
//!
//! Named database connections, script locations and logging settings for the
//! schema provisioner. Settings come from a TOML file, the environment, or both
//! (environment variables override the file).

pub mod settings;

pub use settings::{
    DatabaseConfig, ObservabilityConfig, ProvisionerConfig, ScriptsConfig, DEFAULT_DATABASE_KEY,
};

use crate::errors::Result;
use std::path::Path;

/// Load configuration from an optional TOML file, then apply environment overrides
pub fn load(path: Option<&Path>) -> Result<ProvisionerConfig> {
    let mut config = match path {
        Some(path) => ProvisionerConfig::load_from_path(path)?,
        None => ProvisionerConfig::default(),
    };

    config.apply_env_overrides()?;
    config.validate()?;

    tracing::debug!(
        databases = config.databases.len(),
        default_database = %config.default_database,
        scripts_directory = ?config.scripts.directory,
        "Loaded provisioner configuration"
    );

    Ok(config)
}
