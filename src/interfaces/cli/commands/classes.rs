//! List classes command

use colored::Colorize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::interfaces::cli::CliError;
use crate::storage::SeaOrmStorage;

pub async fn list_classes(storage: Arc<SeaOrmStorage>) -> Result<(), CliError> {
    let classes = storage
        .list_classes()
        .await
        .map_err(|e| CliError::CommandError(format!("Failed to load classes: {}", e)))?;
    let counts: HashMap<String, i64> = storage
        .student_counts_by_class()
        .await
        .map_err(|e| CliError::CommandError(format!("Failed to count students: {}", e)))?
        .into_iter()
        .map(|row| (row.class_name, row.count))
        .collect();

    if classes.is_empty() {
        println!("{} No classes defined yet", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Classes:".bold().green());
    println!();
    let mut total = 0i64;
    for class in &classes {
        let count = counts.get(&class.name).copied().unwrap_or(0);
        total += count;

        let mut parts = vec![format!(
            "{} {}",
            class.name.cyan(),
            format!("({} students)", count).dimmed()
        )];
        if !class.teacher_name.is_empty() {
            parts.push(format!("wali: {}", class.teacher_name).yellow().to_string());
        }
        println!("  {}", parts.join(" "));
    }
    println!();
    println!(
        "{} Total {} classes, {} students",
        "ℹ".bold().blue(),
        classes.len().to_string().green(),
        total.to_string().green()
    );
    Ok(())
}
