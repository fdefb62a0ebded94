//! # Structured Logging
//!
//! Span macros and startup logging built on the tracing ecosystem.

/// Create a tracing span for one script run.
///
/// The `dialect` field starts empty and is recorded once the session's profile has
/// been resolved.
///
/// ```rust,ignore
/// let span = script_span!("create", "journal");
/// let span = script_span!("apply", "journal", separator = "/");
/// ```
#[macro_export]
macro_rules! script_span {
    ($operation:expr, $config_key:expr) => {
        tracing::debug_span!(
            "schema_script",
            operation = %$operation,
            config_key = %$config_key,
            dialect = tracing::field::Empty
        )
    };
    ($operation:expr, $config_key:expr, $($field:tt)*) => {
        tracing::debug_span!(
            "schema_script",
            operation = %$operation,
            config_key = %$config_key,
            dialect = tracing::field::Empty,
            $($field)*
        )
    };
}

/// Log configuration at startup
pub fn log_config_info(config: &crate::config::ProvisionerConfig) {
    let mut keys: Vec<&str> = config.databases.keys().map(String::as_str).collect();
    keys.sort_unstable();

    tracing::info!(
        databases = ?keys,
        default_database = %config.default_database,
        scripts = %config
            .scripts
            .directory
            .as_ref()
            .map(|dir| dir.display().to_string())
            .unwrap_or_else(|| "bundled".to_string()),
        json_logging = config.observability.json_logging,
        "Schema provisioner configuration"
    );
}
