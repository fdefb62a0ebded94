//! # Command Line Interface
//!
//! Create, drop or apply schema scripts against configured databases from the shell.

use crate::config::{self, DatabaseConfig, ProvisionerConfig};
use crate::observability::{init_logging, log_config_info};
use crate::schema::{locate, SchemaDialect, SchemaOperation, SchemaProvisioner};
use crate::storage::{script_loader, SqlxConnectionSource};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "schema-provisioner")]
#[command(about = "Create and drop database schemas for automated tests")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database URL override for the selected database
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    /// Enable verbose logging (shows skipped statements)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the bundled schema, skipping objects that already exist
    Create {
        /// Configuration key of the target database
        #[arg(short, long)]
        database: Option<String>,
    },

    /// Drop the bundled schema, skipping objects that do not exist
    Drop {
        /// Configuration key of the target database
        #[arg(short, long)]
        database: Option<String>,
    },

    /// Apply a script file statement by statement
    Apply {
        /// Script to run
        #[arg(short, long)]
        file: PathBuf,

        /// Statement separator
        #[arg(short, long, default_value = ";")]
        separator: String,

        /// Configuration key of the target database
        #[arg(short, long)]
        database: Option<String>,
    },

    /// Show the bundled script and separator for a dialect
    Locate {
        /// Dialect name (postgres, mysql, oracle, sqlserver, h2)
        #[arg(long)]
        dialect: SchemaDialect,

        /// Schema operation (create, drop)
        #[arg(long)]
        operation: SchemaOperation,
    },
}

/// Run CLI commands
pub async fn run_cli() -> anyhow::Result<()> {
    run(Cli::parse()).await
}

/// What to run once configuration is loaded
enum Action {
    Create,
    Drop,
    Apply { file: PathBuf, separator: String },
}

/// Run a parsed command line
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let (database, action) = match cli.command {
        Commands::Locate { dialect, operation } => {
            let reference = locate(dialect, operation);
            println!("{}\t{}", reference.path, reference.separator);
            return Ok(());
        }
        Commands::Create { database } => (database, Action::Create),
        Commands::Drop { database } => (database, Action::Drop),
        Commands::Apply { file, separator, database } => {
            (database, Action::Apply { file, separator })
        }
    };

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let mut config = config::load(cli.config.as_deref())?;
    if cli.verbose {
        config.observability.log_level = "debug".to_string();
    }
    init_logging(&config.observability)?;

    let key = database.unwrap_or_else(|| config.default_database.clone());
    if let Some(url) = cli.database_url {
        override_database_url(&mut config, &key, url);
    }
    log_config_info(&config);

    let provisioner = SchemaProvisioner::with_scripts(
        Arc::new(SqlxConnectionSource::from_config(&config)),
        script_loader(&config.scripts),
    );

    match action {
        Action::Create => {
            provisioner.create_if_not_exists(&key).await?;
            println!("Schema created for database '{}'", key);
        }
        Action::Drop => {
            provisioner.drop_if_exists(&key).await?;
            println!("Schema dropped for database '{}'", key);
        }
        Action::Apply { file, separator } => {
            let script = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read script file: {}", file.display()))?;
            provisioner.apply_script(script, separator, &key).await?;
            println!("Applied {} to database '{}'", file.display(), key);
        }
    }

    Ok(())
}

fn override_database_url(config: &mut ProvisionerConfig, key: &str, url: String) {
    config
        .databases
        .entry(key.to_string())
        .and_modify(|database| database.url = url.clone())
        .or_insert_with(|| DatabaseConfig::new(url));
}
