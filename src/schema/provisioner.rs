//! # Schema Provisioner
//!
//! Public entry point: create or drop the bundled schema for a configured database,
//! or apply an arbitrary script. Every operation runs its blocking work (session
//! acquisition, script loading, statement execution) on Tokio's blocking thread pool
//! and hands back a [`Completion`] right away.

use crate::errors::{ProvisionError, Result};
use crate::schema::executor::{run_statements, SessionGuard};
use crate::schema::{locate, split_statements, SchemaDialect, SchemaOperation};
use crate::script_span;
use crate::storage::{BundledScripts, ConnectionSource, ScriptLoader};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::info;

/// Pending result of a provisioning operation.
///
/// Resolves once every statement has been attempted. Statement-level failures do not
/// fail it; resolution and connection errors do. Dropping it detaches the work, which
/// still runs to the end.
///
/// Outside a Tokio runtime nothing is started and the completion is already finished
/// with a configuration error.
#[must_use = "a Completion does nothing to report errors unless awaited"]
#[derive(Debug)]
pub struct Completion {
    state: CompletionState,
}

#[derive(Debug)]
enum CompletionState {
    Running(JoinHandle<Result<()>>),
    /// `None` once the error has been handed out
    Failed(Option<ProvisionError>),
}

impl Completion {
    fn spawn<F>(work: F) -> Self
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        let state = match Handle::try_current() {
            Ok(handle) => CompletionState::Running(handle.spawn_blocking(work)),
            Err(e) => CompletionState::Failed(Some(ProvisionError::config_with_source(
                "No Tokio runtime available to run schema scripts",
                Box::new(e),
            ))),
        };
        Self { state }
    }

    /// Whether the blocking work has finished
    pub fn is_finished(&self) -> bool {
        match &self.state {
            CompletionState::Running(handle) => handle.is_finished(),
            CompletionState::Failed(_) => true,
        }
    }
}

impl Future for Completion {
    type Output = Result<()>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.state {
            CompletionState::Running(handle) => Pin::new(handle)
                .poll(cx)
                .map(|joined| joined.unwrap_or_else(|e| Err(ProvisionError::from(e)))),
            CompletionState::Failed(error) => match error.take() {
                Some(error) => Poll::Ready(Err(error)),
                None => Poll::Pending,
            },
        }
    }
}

/// Where the statements of one run come from
enum ScriptSource {
    Bundled(SchemaOperation),
    Inline {
        script: String,
        separator: String,
    },
}

/// Creates and drops a persistence layer's schema for tests.
///
/// Concurrent operations against the same database are not coordinated; callers
/// serialise setup and teardown themselves.
#[derive(Clone)]
pub struct SchemaProvisioner {
    connections: Arc<dyn ConnectionSource>,
    scripts: Arc<dyn ScriptLoader>,
}

impl SchemaProvisioner {
    /// Create a provisioner that reads the scripts bundled with this crate
    pub fn new(connections: Arc<dyn ConnectionSource>) -> Self {
        Self::with_scripts(connections, Arc::new(BundledScripts))
    }

    /// Create a provisioner with a custom script loader
    pub fn with_scripts(
        connections: Arc<dyn ConnectionSource>,
        scripts: Arc<dyn ScriptLoader>,
    ) -> Self {
        Self {
            connections,
            scripts,
        }
    }

    /// Run the dialect's create script against the database configured under `config_key`.
    ///
    /// Objects that already exist produce logged statement failures, not errors.
    pub fn create_if_not_exists(&self, config_key: &str) -> Completion {
        self.spawn(config_key, ScriptSource::Bundled(SchemaOperation::Create))
    }

    /// Run the dialect's drop script against the database configured under `config_key`.
    ///
    /// Objects that do not exist produce logged statement failures, not errors.
    pub fn drop_if_exists(&self, config_key: &str) -> Completion {
        self.spawn(config_key, ScriptSource::Bundled(SchemaOperation::Drop))
    }

    /// Split `script` on `separator` and run it against the database configured under
    /// `config_key`, with the same per-statement tolerance as the bundled scripts.
    pub fn apply_script(
        &self,
        script: impl Into<String>,
        separator: impl Into<String>,
        config_key: &str,
    ) -> Completion {
        self.spawn(
            config_key,
            ScriptSource::Inline {
                script: script.into(),
                separator: separator.into(),
            },
        )
    }

    fn spawn(&self, config_key: &str, source: ScriptSource) -> Completion {
        let connections = self.connections.clone();
        let scripts = self.scripts.clone();
        let config_key = config_key.to_string();

        Completion::spawn(move || run(connections.as_ref(), scripts.as_ref(), &config_key, source))
    }
}

fn run(
    connections: &dyn ConnectionSource,
    scripts: &dyn ScriptLoader,
    config_key: &str,
    source: ScriptSource,
) -> Result<()> {
    let operation = match &source {
        ScriptSource::Bundled(operation) => operation.name(),
        ScriptSource::Inline { .. } => "apply",
    };
    let span = script_span!(operation, config_key);
    let _entered = span.enter();

    let guard = SessionGuard::new(connections.acquire(config_key)?);

    let (script, separator, origin) = match source {
        ScriptSource::Bundled(operation) => {
            let dialect = SchemaDialect::from_profile(guard.profile())?;
            let reference = locate(dialect, operation);
            span.record("dialect", dialect.name());
            let script = scripts.load(reference.path)?;
            (script, reference.separator.to_string(), reference.path)
        }
        ScriptSource::Inline { script, separator } => (script, separator, "inline"),
    };

    let statements = split_statements(&script, &separator);
    let report = run_statements(guard, &statements);

    info!(
        script = origin,
        attempted = report.attempted(),
        failed = report.failed(),
        "Schema script applied"
    );

    Ok(())
}
