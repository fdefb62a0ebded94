//! # Observability Infrastructure
//!
//! Logging setup for the provisioner. Library code only emits `tracing` events; the
//! subscriber is installed by binaries and tests.

pub mod logging;

pub use logging::log_config_info;

use crate::config::ObservabilityConfig;
use crate::errors::{ProvisionError, Result};
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins over the configured level. A subscriber that is already installed
/// (for example by a test harness) is left in place.
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    let directives = std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone());
    let filter = env_filter(&directives)?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if config.json_logging {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if installed.is_err() {
        // Subscriber already set elsewhere (e.g. integration tests); ignore.
    }
    Ok(())
}

fn env_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).map_err(|e| {
        ProvisionError::config_with_source(
            format!("Invalid log filter '{}'", directives),
            Box::new(e),
        )
    })
}
