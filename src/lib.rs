//! # Schema Provisioner
//!
//! Creates and drops a persistence layer's database schema for automated tests.
//!
//! A bundled SQL script is picked per dialect, split into statements on the dialect's
//! separator (`/` for Oracle, `;` elsewhere) and run one statement at a time. Statements
//! that fail because an object already exists (create) or is missing (drop) are logged
//! and skipped, so setup and teardown can be repeated freely.
//!
//! ## Architecture
//!
//! ```text
//! SchemaProvisioner ─┬─ ConnectionSource → Session (blocking, per config key)
//!                    ├─ SchemaDialect::from_profile → locate → ScriptLoader
//!                    └─ split_statements → execute_statements
//! ```
//!
//! This is test tooling, not a migration engine: there is no version tracking, no
//! transaction around a script, and statement errors are never reported to callers.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use schema_provisioner::{config, storage::SqlxConnectionSource, Result, SchemaProvisioner};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = config::load(None)?;
//!     let provisioner =
//!         SchemaProvisioner::new(Arc::new(SqlxConnectionSource::from_config(&config)));
//!
//!     provisioner.create_if_not_exists("default").await?;
//!     // ... run tests ...
//!     provisioner.drop_if_exists("default").await
//! }
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod observability;
pub mod schema;
pub mod storage;

// Re-export commonly used types and traits
pub use config::{DatabaseConfig, ProvisionerConfig};
pub use errors::{ProvisionError, Result, StatementError};
pub use schema::{Completion, SchemaDialect, SchemaOperation, SchemaProvisioner};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
