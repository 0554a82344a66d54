//! Migrate command

use colored::Colorize;
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;

use crate::interfaces::cli::CliError;
use crate::storage::SeaOrmStorage;

/// 连接时已执行迁移，这里只打印结果
pub async fn run_migrate(storage: Arc<SeaOrmStorage>) -> Result<(), CliError> {
    let applied = Migrator::get_applied_migrations(storage.get_db())
        .await
        .map_err(|e| CliError::StorageError(format!("Failed to read migrations: {}", e)))?;

    println!(
        "{} {} ({})",
        "Database is up to date".green(),
        storage.backend_name().to_uppercase().cyan(),
        crate::config::get_config().database.database_url.dimmed()
    );
    for m in &applied {
        println!("  {} {}", "✓".green(), m.name());
    }
    Ok(())
}
