//! CSV export of a report

use csv::WriterBuilder;

use super::AttendanceReport;
use super::layout::COLUMNS;
use crate::errors::{AttendanceError, Result};

/// Header line followed by one record per report row
pub fn render_csv(report: &AttendanceReport) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(COLUMNS)?;

    for row in &report.rows {
        writer.write_record([
            row.no.to_string(),
            row.nis.clone(),
            row.name.clone(),
            row.class_name.clone(),
            row.status.to_string(),
            row.date.format("%Y-%m-%d").to_string(),
            row.note.clone(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| AttendanceError::report_generation(format!("CSV: {}", e.error())))
}
