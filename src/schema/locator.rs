//! Bundled script lookup per dialect and operation.

use crate::errors::{ProvisionError, Result};
use crate::schema::SchemaDialect;
use std::fmt;
use std::str::FromStr;

/// A schema lifecycle operation with a bundled script per dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaOperation {
    Create,
    Drop,
}

impl SchemaOperation {
    /// Every operation with bundled scripts
    pub const ALL: [SchemaOperation; 2] = [SchemaOperation::Create, SchemaOperation::Drop];

    /// Lower-case name, as used in script paths
    pub fn name(&self) -> &'static str {
        match self {
            SchemaOperation::Create => "create",
            SchemaOperation::Drop => "drop",
        }
    }
}

impl fmt::Display for SchemaOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SchemaOperation {
    type Err = ProvisionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create" => Ok(SchemaOperation::Create),
            "drop" => Ok(SchemaOperation::Drop),
            _ => Err(ProvisionError::validation_field(
                format!("Unknown schema operation '{}', expected 'create' or 'drop'", s),
                "operation",
            )),
        }
    }
}

/// Location and statement separator of one bundled script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptReference {
    pub path: &'static str,
    pub separator: &'static str,
}

impl SchemaDialect {
    /// Statement separator used by this dialect's scripts.
    ///
    /// Oracle scripts terminate statements with `/` on its own line because
    /// PL/SQL blocks contain `;`.
    pub fn separator(&self) -> &'static str {
        match self {
            SchemaDialect::Oracle => "/",
            SchemaDialect::Postgres
            | SchemaDialect::MySql
            | SchemaDialect::SqlServer
            | SchemaDialect::H2 => ";",
        }
    }
}

/// Path of the bundled script for a dialect and operation
fn script_path(dialect: SchemaDialect, operation: SchemaOperation) -> &'static str {
    use SchemaDialect::*;
    use SchemaOperation::*;

    match (dialect, operation) {
        (Postgres, Create) => "schema/postgres/postgres-create-schema.sql",
        (Postgres, Drop) => "schema/postgres/postgres-drop-schema.sql",
        (MySql, Create) => "schema/mysql/mysql-create-schema.sql",
        (MySql, Drop) => "schema/mysql/mysql-drop-schema.sql",
        (Oracle, Create) => "schema/oracle/oracle-create-schema.sql",
        (Oracle, Drop) => "schema/oracle/oracle-drop-schema.sql",
        (SqlServer, Create) => "schema/sqlserver/sqlserver-create-schema.sql",
        (SqlServer, Drop) => "schema/sqlserver/sqlserver-drop-schema.sql",
        (H2, Create) => "schema/h2/h2-create-schema.sql",
        (H2, Drop) => "schema/h2/h2-drop-schema.sql",
    }
}

/// Locate the bundled script for a dialect and operation
pub fn locate(dialect: SchemaDialect, operation: SchemaOperation) -> ScriptReference {
    ScriptReference {
        path: script_path(dialect, operation),
        separator: dialect.separator(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pair_resolves() {
        for dialect in SchemaDialect::ALL {
            for operation in SchemaOperation::ALL {
                let reference = locate(dialect, operation);
                assert!(!reference.path.is_empty());
                assert!(!reference.separator.is_empty());
            }
        }
    }

    #[test]
    fn test_paths_follow_naming_convention() {
        for dialect in SchemaDialect::ALL {
            for operation in SchemaOperation::ALL {
                let expected = format!("schema/{0}/{0}-{1}-schema.sql", dialect, operation);
                assert_eq!(locate(dialect, operation).path, expected);
            }
        }
    }

    #[test]
    fn test_separators() {
        assert_eq!(locate(SchemaDialect::Oracle, SchemaOperation::Create).separator, "/");
        assert_eq!(locate(SchemaDialect::Oracle, SchemaOperation::Drop).separator, "/");
        for dialect in [
            SchemaDialect::Postgres,
            SchemaDialect::MySql,
            SchemaDialect::SqlServer,
            SchemaDialect::H2,
        ] {
            assert_eq!(locate(dialect, SchemaOperation::Create).separator, ";");
            assert_eq!(locate(dialect, SchemaOperation::Drop).separator, ";");
        }
    }

    #[test]
    fn test_operation_from_str() {
        assert_eq!("create".parse::<SchemaOperation>().unwrap(), SchemaOperation::Create);
        assert_eq!("DROP".parse::<SchemaOperation>().unwrap(), SchemaOperation::Drop);
        assert!("migrate".parse::<SchemaOperation>().is_err());
    }
}
