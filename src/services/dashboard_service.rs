//! Dashboard aggregates: today's counts, class sizes and the weekly trend

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::errors::Result;
use crate::storage::{AttendanceStatus, SeaOrmStorage};
use crate::utils::{SCHOOL_WEEK_LABELS, indonesian_date_label, school_week};

/// Per-status record counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub hadir: u64,
    pub sakit: u64,
    pub izin: u64,
    pub alfa: u64,
    pub total: u64,
}

impl StatusCounts {
    pub fn add(&mut self, status: AttendanceStatus, n: u64) {
        match status {
            AttendanceStatus::Hadir => self.hadir += n,
            AttendanceStatus::Sakit => self.sakit += n,
            AttendanceStatus::Izin => self.izin += n,
            AttendanceStatus::Alfa => self.alfa += n,
        }
        self.total += n;
    }

    pub fn get(&self, status: AttendanceStatus) -> u64 {
        match status {
            AttendanceStatus::Hadir => self.hadir,
            AttendanceStatus::Sakit => self.sakit,
            AttendanceStatus::Izin => self.izin,
            AttendanceStatus::Alfa => self.alfa,
        }
    }

    /// Pie series in display order with empty slices removed
    pub fn pie_series(&self) -> Vec<ChartPoint> {
        [
            AttendanceStatus::Hadir,
            AttendanceStatus::Izin,
            AttendanceStatus::Sakit,
            AttendanceStatus::Alfa,
        ]
        .into_iter()
        .map(|status| ChartPoint {
            name: status.to_string(),
            value: self.get(status),
        })
        .filter(|p| p.value > 0)
        .collect()
    }
}

impl FromIterator<AttendanceStatus> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = AttendanceStatus>>(iter: I) -> Self {
        let mut counts = StatusCounts::default();
        for status in iter {
            counts.add(status, 1);
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassSize {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub label: &'static str,
    pub date: NaiveDate,
    pub hadir: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub date: NaiveDate,
    pub date_label: String,
    pub counts: StatusCounts,
    pub pie: Vec<ChartPoint>,
    pub students_per_class: Vec<ClassSize>,
    pub weekly_trend: Vec<TrendPoint>,
}

/// Monday..Saturday of the week containing `day`, with Hadir counts per day
pub fn weekly_trend(day: NaiveDate, present_dates: &[NaiveDate]) -> Vec<TrendPoint> {
    let mut per_day: HashMap<NaiveDate, u64> = HashMap::new();
    for date in present_dates {
        *per_day.entry(*date).or_default() += 1;
    }

    school_week(day)
        .into_iter()
        .zip(SCHOOL_WEEK_LABELS)
        .map(|(date, label)| TrendPoint {
            label,
            date,
            hadir: per_day.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

pub struct DashboardService {
    storage: Arc<SeaOrmStorage>,
}

impl DashboardService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn dashboard(&self, date: NaiveDate) -> Result<DashboardData> {
        let mut counts = StatusCounts::default();
        for row in self.storage.status_counts_on(date).await? {
            counts.add(
                AttendanceStatus::from_db(&row.status),
                row.count.max(0) as u64,
            );
        }

        let students_per_class = self
            .storage
            .student_counts_by_class()
            .await?
            .into_iter()
            .map(|row| ClassSize {
                name: row.class_name,
                count: row.count.max(0) as u64,
            })
            .collect();

        let week = school_week(date);
        let present = self
            .storage
            .dates_with_status(AttendanceStatus::Hadir, week[0], week[5])
            .await?;

        debug!(
            "DashboardService: {} records on {}, {} present this week",
            counts.total,
            date,
            present.len()
        );

        Ok(DashboardData {
            date,
            date_label: indonesian_date_label(date),
            pie: counts.pie_series(),
            counts,
            students_per_class,
            weekly_trend: weekly_trend(date, &present),
        })
    }
}
