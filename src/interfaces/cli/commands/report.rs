//! Export report command

use colored::Colorize;
use std::path::Path;
use std::sync::Arc;

use crate::interfaces::cli::CliError;
use crate::report::{AttendanceReport, ReportQuery, csv::render_csv, pdf::render_pdf};
use crate::services::{ReportService, SettingsService};
use crate::storage::SeaOrmStorage;
use crate::utils::school_today;

/// Output format chosen from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Pdf,
    Csv,
}

impl ReportFormat {
    pub fn from_path(path: &str) -> Self {
        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => ReportFormat::Csv,
            _ => ReportFormat::Pdf,
        }
    }
}

fn render(report: &AttendanceReport, format: ReportFormat) -> Result<Vec<u8>, CliError> {
    let bytes = match format {
        ReportFormat::Pdf => render_pdf(report)?,
        ReportFormat::Csv => render_csv(report)?,
    };
    Ok(bytes)
}

pub async fn export_report(
    storage: Arc<SeaOrmStorage>,
    period: String,
    date: Option<String>,
    month: Option<String>,
    class: Option<String>,
    output: Option<String>,
) -> Result<(), CliError> {
    let query = ReportQuery::from_params(
        Some(&period),
        date.as_deref(),
        month.as_deref(),
        class.as_deref(),
        school_today(),
    )?;

    let settings = Arc::new(SettingsService::new(storage.clone()));
    let service = ReportService::new(storage, settings);
    let report = service.build_report(&query).await?;

    let millis = chrono::Utc::now().timestamp_millis();
    let output = output.unwrap_or_else(|| report.pdf_file_name(millis));
    let format = ReportFormat::from_path(&output);
    let bytes = render(&report, format)?;

    std::fs::write(&output, &bytes).map_err(|e| {
        CliError::CommandError(format!("Unable to write report to {}: {}", output, e))
    })?;

    println!(
        "{} {} ({} rows, {} bytes)",
        "Report written:".green(),
        output.blue(),
        report.rows.len().to_string().cyan(),
        bytes.len()
    );
    println!(
        "  {} Hadir {}  Sakit {}  Izin {}  Alfa {}",
        "Summary:".bold(),
        report.summary.hadir,
        report.summary.sakit,
        report.summary.izin,
        report.summary.alfa
    );
    Ok(())
}
