//! # Database Sessions
//!
//! Blocking session abstraction the statement executor runs against. Sessions are
//! driven from Tokio's blocking thread pool, so implementations may block freely.

use crate::errors::{Result, StatementResult};

/// An open connection that runs one statement at a time.
pub trait Session: Send {
    /// Connection profile identifier used to pick the schema dialect
    fn profile(&self) -> &str;

    /// Run one statement. Database-level failures are reported, never panicked on.
    fn execute(&mut self, statement: &str) -> StatementResult;

    /// Release the connection.
    ///
    /// Implementations should also release on drop: the executor calls `close` on
    /// every normal path but a panicking session is only dropped.
    fn close(self: Box<Self>) -> StatementResult;
}

/// Hands out sessions for databases addressed by configuration key.
pub trait ConnectionSource: Send + Sync {
    /// Open a session for the database configured under `key`
    fn acquire(&self, key: &str) -> Result<Box<dyn Session>>;
}
