//! Dialect resolution from connection profiles.

use crate::errors::{ProvisionError, Result};
use std::fmt;
use std::str::FromStr;

/// The SQL variant a bundled script targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaDialect {
    Postgres,
    MySql,
    Oracle,
    SqlServer,
    H2,
}

impl SchemaDialect {
    /// Every supported dialect
    pub const ALL: [SchemaDialect; 5] = [
        SchemaDialect::Postgres,
        SchemaDialect::MySql,
        SchemaDialect::Oracle,
        SchemaDialect::SqlServer,
        SchemaDialect::H2,
    ];

    /// Resolve the dialect for a connection profile identifier.
    ///
    /// Matching ignores ASCII case and surrounding whitespace. Anything outside the
    /// known profiles is an [`ProvisionError::UnsupportedDialect`]; there is no fallback.
    pub fn from_profile(profile: &str) -> Result<Self> {
        let normalized = profile.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "postgres" | "postgresql" | "pg" => Ok(SchemaDialect::Postgres),
            "mysql" | "mariadb" => Ok(SchemaDialect::MySql),
            "oracle" => Ok(SchemaDialect::Oracle),
            "sqlserver" | "mssql" => Ok(SchemaDialect::SqlServer),
            "h2" => Ok(SchemaDialect::H2),
            _ => Err(ProvisionError::unsupported_dialect(profile)),
        }
    }

    /// Canonical lower-case name, as used in script paths
    pub fn name(&self) -> &'static str {
        match self {
            SchemaDialect::Postgres => "postgres",
            SchemaDialect::MySql => "mysql",
            SchemaDialect::Oracle => "oracle",
            SchemaDialect::SqlServer => "sqlserver",
            SchemaDialect::H2 => "h2",
        }
    }
}

impl fmt::Display for SchemaDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SchemaDialect {
    type Err = ProvisionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_profile(s)
    }
}
