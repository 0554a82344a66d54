//! CLI interface module
//!
//! Operational commands that work directly against the database.

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::storage::StorageFactory;
use commands::{config_generate, export_report, list_classes, run_migrate};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::AttendanceError> for CliError {
    fn from(err: crate::errors::AttendanceError) -> Self {
        use crate::errors::AttendanceError;
        match err {
            AttendanceError::Validation(_) | AttendanceError::DateParse(_) => {
                CliError::ParseError(err.message().to_string())
            }
            AttendanceError::DatabaseConfig(_)
            | AttendanceError::DatabaseConnection(_)
            | AttendanceError::DatabaseOperation(_) => CliError::StorageError(err.to_string()),
            _ => CliError::CommandError(err.to_string()),
        }
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    // Generate doesn't need DB connection
    if let Commands::Config {
        action: ConfigCommands::Generate { output_path, force },
    } = cmd
    {
        return config_generate(output_path, force).await;
    }

    let storage = StorageFactory::create()
        .await
        .map_err(|e| CliError::StorageError(e.to_string()))?;

    let result = match cmd {
        Commands::Migrate => run_migrate(storage.clone()).await,
        Commands::Report {
            period,
            date,
            month,
            class,
            output,
        } => export_report(storage.clone(), period, date, month, class, output).await,
        Commands::Classes => list_classes(storage.clone()).await,
        Commands::Config { .. } => unreachable!("handled above"),
    };

    if let Err(e) = storage.get_db().clone().close().await {
        tracing::warn!("Failed to close database pool: {}", e);
    }

    result
}
