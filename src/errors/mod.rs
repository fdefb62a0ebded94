//! # Error Handling
//!
//! Error types for schema provisioning, built on `thiserror`.
//!
//! Two families exist. [`ProvisionError`] is fatal: it fails the completion handle of a
//! provisioning operation before any statement runs. [`StatementError`] is recovered
//! locally by the statement executor and never reaches the caller.

pub mod types;

pub use types::{ProvisionError, Result, StatementError, StatementResult};
