//! # Schema Provisioning
//!
//! Dialect resolution, script lookup, statement splitting and tolerant execution,
//! tied together by [`SchemaProvisioner`].
//!
//! ```text
//! config key → Session → profile → SchemaDialect → ScriptReference → script text
//!                                                  → statements → StatementExecutor
//! ```

pub mod dialect;
pub mod executor;
pub mod locator;
pub mod provisioner;
pub mod splitter;

pub use dialect::SchemaDialect;
pub use executor::{execute_statements, ExecutionReport};
pub use locator::{locate, SchemaOperation, ScriptReference};
pub use provisioner::{Completion, SchemaProvisioner};
pub use splitter::split_statements;
