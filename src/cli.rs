//! Command-line interface definitions using clap
//!
//! Running without a subcommand starts the HTTP server.

use clap::{Parser, Subcommand};

/// Attendance tracker - classes, students, teachers and daily attendance over a JSON API
#[derive(Parser)]
#[command(name = "attendance-tracker")]
#[command(version)]
#[command(about = "School attendance tracker service", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Run database migrations and exit
    Migrate,

    /// Export an attendance report straight from the database
    ///
    /// The format follows the output extension: `.csv` writes CSV, anything else PDF.
    Report {
        /// daily or monthly
        #[arg(long, default_value = "daily")]
        period: String,

        /// Day for daily reports (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,

        /// Month for monthly reports (YYYY-MM, default: this month)
        #[arg(long)]
        month: Option<String>,

        /// Class name, or "Semua" for every class
        #[arg(long)]
        class: Option<String>,

        /// Output file path (default: generated Laporan_*.pdf)
        #[arg(long, short = 'o')]
        output: Option<String>,
    },

    /// List classes with their student counts
    Classes,
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
