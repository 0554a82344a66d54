//! Mode routing
//!
//! No subcommand runs the HTTP server; any subcommand runs the CLI.

pub mod cli;
pub mod server;

pub use cli::run_cli;
pub use server::run_server;
