//! # Error Types
//!
//! Error types for the schema provisioner using `thiserror`.

/// Custom result type for provisioning operations
pub type Result<T> = std::result::Result<T, ProvisionError>;

/// Outcome of running a single statement against a session
pub type StatementResult = std::result::Result<(), StatementError>;

/// Fatal errors of a provisioning operation
#[derive(thiserror::Error, Debug)]
pub enum ProvisionError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// The connection profile does not name a supported dialect
    #[error("Unsupported dialect: no schema dialect matches connection profile '{profile}'")]
    UnsupportedDialect { profile: String },

    /// No database is configured under the requested key
    #[error("Unknown database: no database configured under key '{key}'")]
    UnknownDatabase { key: String },

    /// A script resource could not be found
    #[error("Resource not found: {path}")]
    ResourceNotFound { path: String },

    /// I/O errors with additional context
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },

    /// Acquiring a session for a configured database failed
    #[error("Connection error for database '{key}': {message}")]
    Connection {
        key: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The blocking task running a script panicked or was cancelled
    #[error("Blocking task failed: {source}")]
    Task {
        #[source]
        source: tokio::task::JoinError,
    },
}

impl ProvisionError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S: Into<String>>(
        message: S,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a validation error with field information
    pub fn validation_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create an unsupported dialect error
    pub fn unsupported_dialect<S: Into<String>>(profile: S) -> Self {
        Self::UnsupportedDialect {
            profile: profile.into(),
        }
    }

    /// Create an unknown database error
    pub fn unknown_database<S: Into<String>>(key: S) -> Self {
        Self::UnknownDatabase { key: key.into() }
    }

    /// Create a resource not found error
    pub fn resource_not_found<S: Into<String>>(path: S) -> Self {
        Self::ResourceNotFound { path: path.into() }
    }

    /// Create an I/O error with context
    pub fn io<S: Into<String>>(source: std::io::Error, context: S) -> Self {
        Self::Io {
            source,
            context: context.into(),
        }
    }

    /// Create a connection error
    pub fn connection<K: Into<String>, M: Into<String>>(key: K, message: M) -> Self {
        Self::Connection {
            key: key.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a connection error with source
    pub fn connection_with_source<K: Into<String>, M: Into<String>>(
        key: K,
        message: M,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Connection {
            key: key.into(),
            message: message.into(),
            source: Some(source),
        }
    }

    /// Whether the error was raised while resolving what to run, before touching a database
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            ProvisionError::UnsupportedDialect { .. }
                | ProvisionError::UnknownDatabase { .. }
                | ProvisionError::ResourceNotFound { .. }
        )
    }
}

impl From<std::io::Error> for ProvisionError {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            source: error,
            context: "I/O operation failed".to_string(),
        }
    }
}

impl From<toml::de::Error> for ProvisionError {
    fn from(error: toml::de::Error) -> Self {
        Self::config_with_source("Configuration file could not be parsed", Box::new(error))
    }
}

impl From<tokio::task::JoinError> for ProvisionError {
    fn from(error: tokio::task::JoinError) -> Self {
        Self::Task { source: error }
    }
}

impl From<validator::ValidationErrors> for ProvisionError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .map(|(field, field_errors)| {
                let error_messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| {
                        e.message.as_ref().map_or("Invalid value".to_string(), |m| m.to_string())
                    })
                    .collect();
                format!("{}: {}", field, error_messages.join(", "))
            })
            .collect::<Vec<_>>()
            .join("; ");

        Self::validation(format!("Validation failed: {}", message))
    }
}

/// A database-level error raised by one statement.
///
/// The executor logs these and moves on to the next statement, so a benign
/// "already exists" and a genuine permission problem look the same to callers.
#[derive(thiserror::Error, Debug)]
#[error("{message}")]
pub struct StatementError {
    /// Driver-provided message
    pub message: String,
    /// Vendor or SQLSTATE code, when the driver reports one
    pub code: Option<String>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StatementError {
    /// Create a statement error from a message
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            code: None,
            source: None,
        }
    }

    /// Attach a vendor or SQLSTATE code
    pub fn with_code<S: Into<String>>(mut self, code: S) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attach the underlying driver error
    pub fn with_source(mut self, source: Box<dyn std::error::Error + Send + Sync>) -> Self {
        self.source = Some(source);
        self
    }
}

impl From<sqlx::Error> for StatementError {
    fn from(error: sqlx::Error) -> Self {
        let code = error
            .as_database_error()
            .and_then(|db_err| db_err.code().map(|code| code.into_owned()));
        let statement_error = StatementError::new(error.to_string());
        let statement_error = match code {
            Some(code) => statement_error.with_code(code),
            None => statement_error,
        };
        statement_error.with_source(Box::new(error))
    }
}
