//! # Storage and Persistence
//!
//! Collaborators the schema provisioner consumes: database sessions addressed by
//! configuration key, and script resources addressed by path.

pub mod scripts;
pub mod session;
pub mod sqlx_session;

pub use scripts::{BundledScripts, DirectoryScripts, ScriptLoader};
pub use session::{ConnectionSource, Session};
pub use sqlx_session::SqlxConnectionSource;

use crate::config::ScriptsConfig;
use std::sync::Arc;

/// Build the script loader selected by configuration
pub fn script_loader(config: &ScriptsConfig) -> Arc<dyn ScriptLoader> {
    match &config.directory {
        Some(directory) => Arc::new(DirectoryScripts::new(directory.clone())),
        None => Arc::new(BundledScripts),
    }
}
