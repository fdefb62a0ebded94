//! # Statement Execution
//!
//! Runs a statement sequence against one session, strictly in order. A statement that
//! fails is logged at debug level and skipped; the rest of the script still runs. This
//! keeps create/drop cycles idempotent in test environments, at the price of hiding
//! real failures (permissions, syntax) behind the same silence as "already exists".
//! It is not a fit for production schema changes.

use crate::errors::StatementResult;
use crate::storage::Session;
use tracing::{debug, trace};

/// Aggregate outcome of one script run.
///
/// Individual statement errors are only visible in the debug log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    attempted: usize,
    failed: usize,
}

impl ExecutionReport {
    fn from_outcomes(outcomes: &[StatementResult]) -> Self {
        Self {
            attempted: outcomes.len(),
            failed: outcomes.iter().filter(|result| result.is_err()).count(),
        }
    }

    /// Number of statements attempted
    pub fn attempted(&self) -> usize {
        self.attempted
    }

    /// Number of statements that raised a database error
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Number of statements that ran cleanly
    pub fn succeeded(&self) -> usize {
        self.attempted - self.failed
    }
}

/// Owns a session and releases it on every exit path.
///
/// Normal drops close the session; a drop during unwinding only drops it, leaving the
/// release to the session's own `Drop`.
pub(crate) struct SessionGuard {
    session: Option<Box<dyn Session>>,
}

impl SessionGuard {
    pub(crate) fn new(session: Box<dyn Session>) -> Self {
        Self {
            session: Some(session),
        }
    }

    pub(crate) fn profile(&self) -> &str {
        self.session.as_deref().map(|session| session.profile()).unwrap_or_default()
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };

        if std::thread::panicking() {
            drop(session);
            return;
        }

        if let Err(e) = session.close() {
            debug!(error = %e, code = ?e.code, "Failed to close database session");
        }
    }
}

/// Run every statement in order against `session`, then release it.
///
/// Never fails: statement errors are logged at debug level and only counted in the report.
pub fn execute_statements(session: Box<dyn Session>, statements: &[&str]) -> ExecutionReport {
    run_statements(SessionGuard::new(session), statements)
}

pub(crate) fn run_statements(mut guard: SessionGuard, statements: &[&str]) -> ExecutionReport {
    let mut outcomes = Vec::with_capacity(statements.len());

    // The session is only taken by `Drop`
    if let Some(session) = guard.session.as_deref_mut() {
        for (index, statement) in statements.iter().copied().enumerate() {
            let result = session.execute(statement);
            match &result {
                Ok(()) => trace!(statement_index = index, "Statement executed"),
                Err(e) => debug!(
                    statement_index = index,
                    error = %e,
                    code = ?e.code,
                    statement,
                    "Statement failed, continuing with next statement"
                ),
            }
            outcomes.push(result);
        }
    }

    drop(guard);
    ExecutionReport::from_outcomes(&outcomes)
}
