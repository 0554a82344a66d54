//! Report assembly from the database

use std::sync::Arc;

use tracing::info;

use crate::errors::Result;
use crate::report::{AttendanceReport, ReportQuery};
use crate::storage::SeaOrmStorage;

use super::SettingsService;

pub struct ReportService {
    storage: Arc<SeaOrmStorage>,
    settings: Arc<SettingsService>,
}

impl ReportService {
    pub fn new(storage: Arc<SeaOrmStorage>, settings: Arc<SettingsService>) -> Self {
        Self { storage, settings }
    }

    pub async fn build_report(&self, query: &ReportQuery) -> Result<AttendanceReport> {
        let (start, end) = query.period.range();
        let records = self.storage.attendance_between(start, end).await?;

        // 单个班级时带上班主任与校长信息用于签名
        let class = match query.class_name.as_deref() {
            Some(name) => self.storage.find_class_by_name(name).await?,
            None => None,
        };

        let school_name = self.settings.school_name().await;
        let report = AttendanceReport::build(&school_name, query, records, class.as_ref());

        info!(
            "ReportService: {} report {} ({}) with {} rows",
            report.period,
            report.period_label,
            query.class_name.as_deref().unwrap_or(crate::utils::ALL_CLASSES),
            report.rows.len()
        );
        Ok(report)
    }
}
