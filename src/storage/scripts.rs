//! # Script Resources
//!
//! Loading schema scripts by their resource path (`schema/<dialect>/<file>.sql`).
//! Scripts are bundled into the binary; a directory on disk can replace them when
//! a project ships its own copies.

use crate::errors::{ProvisionError, Result};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Loads the full text of a script resource.
pub trait ScriptLoader: Send + Sync {
    /// Return the content of the resource at `path`
    fn load(&self, path: &str) -> Result<String>;
}

const BUNDLED_SCRIPTS: &[(&str, &str)] = &[
    (
        "schema/postgres/postgres-create-schema.sql",
        include_str!("../../schema/postgres/postgres-create-schema.sql"),
    ),
    (
        "schema/postgres/postgres-drop-schema.sql",
        include_str!("../../schema/postgres/postgres-drop-schema.sql"),
    ),
    (
        "schema/mysql/mysql-create-schema.sql",
        include_str!("../../schema/mysql/mysql-create-schema.sql"),
    ),
    (
        "schema/mysql/mysql-drop-schema.sql",
        include_str!("../../schema/mysql/mysql-drop-schema.sql"),
    ),
    (
        "schema/oracle/oracle-create-schema.sql",
        include_str!("../../schema/oracle/oracle-create-schema.sql"),
    ),
    (
        "schema/oracle/oracle-drop-schema.sql",
        include_str!("../../schema/oracle/oracle-drop-schema.sql"),
    ),
    (
        "schema/sqlserver/sqlserver-create-schema.sql",
        include_str!("../../schema/sqlserver/sqlserver-create-schema.sql"),
    ),
    (
        "schema/sqlserver/sqlserver-drop-schema.sql",
        include_str!("../../schema/sqlserver/sqlserver-drop-schema.sql"),
    ),
    ("schema/h2/h2-create-schema.sql", include_str!("../../schema/h2/h2-create-schema.sql")),
    ("schema/h2/h2-drop-schema.sql", include_str!("../../schema/h2/h2-drop-schema.sql")),
];

/// Scripts compiled into the crate
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledScripts;

impl BundledScripts {
    /// Resource paths of every bundled script
    pub fn paths() -> impl Iterator<Item = &'static str> {
        BUNDLED_SCRIPTS.iter().map(|(path, _)| *path)
    }

    /// Borrow a bundled script without copying it
    pub fn get(path: &str) -> Option<&'static str> {
        BUNDLED_SCRIPTS.iter().find(|(candidate, _)| *candidate == path).map(|(_, script)| *script)
    }
}

impl ScriptLoader for BundledScripts {
    fn load(&self, path: &str) -> Result<String> {
        Self::get(path)
            .map(str::to_string)
            .ok_or_else(|| ProvisionError::resource_not_found(path))
    }
}

/// Scripts read from a directory, resolving resource paths relative to its root
#[derive(Debug, Clone)]
pub struct DirectoryScripts {
    root: PathBuf,
}

impl DirectoryScripts {
    /// Create a loader rooted at `root`
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        // Resource paths stay below the root
        if relative.components().any(|c| !matches!(c, Component::Normal(_) | Component::CurDir)) {
            return Err(ProvisionError::validation_field(
                format!("Script path must be relative to the script directory: {}", path),
                "path",
            ));
        }
        Ok(self.root.join(relative))
    }
}

impl ScriptLoader for DirectoryScripts {
    fn load(&self, path: &str) -> Result<String> {
        let file = self.resolve(path)?;

        match std::fs::read_to_string(&file) {
            Ok(content) => {
                debug!(path = %file.display(), bytes = content.len(), "Loaded script from disk");
                Ok(content)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ProvisionError::resource_not_found(file.display().to_string()))
            }
            Err(e) => {
                Err(ProvisionError::io(e, format!("Failed to read script {}", file.display())))
            }
        }
    }
}
