//! Attendance reports
//!
//! A report is the list of student attendance rows for one day or one month,
//! optionally restricted to a class, plus per-status totals. The same report
//! is served as JSON, rendered to an A4 PDF or written as CSV.

pub mod csv;
pub mod layout;
pub mod pdf;

use chrono::NaiveDate;
use serde::Serialize;
use strum::{Display, EnumString};

use crate::errors::{AttendanceError, Result};
use crate::services::StatusCounts;
use crate::storage::backend::AttendanceWithStudent;
use crate::storage::{AttendanceStatus, ClassRecord};
use crate::utils::{class_selection, month_bounds, non_blank, parse_date, parse_month};

/// Report period kind as accepted on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum PeriodKind {
    #[default]
    #[strum(to_string = "daily", serialize = "harian")]
    Daily,
    #[strum(to_string = "monthly", serialize = "bulanan")]
    Monthly,
}

/// Resolved report period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    Daily(NaiveDate),
    /// First day of the month
    Monthly(NaiveDate),
}

impl ReportPeriod {
    pub fn kind(&self) -> PeriodKind {
        match self {
            ReportPeriod::Daily(_) => PeriodKind::Daily,
            ReportPeriod::Monthly(_) => PeriodKind::Monthly,
        }
    }

    /// Inclusive date range covered by the period
    pub fn range(&self) -> (NaiveDate, NaiveDate) {
        match *self {
            ReportPeriod::Daily(day) => (day, day),
            ReportPeriod::Monthly(first) => month_bounds(first),
        }
    }

    /// `YYYY-MM-DD` for a day, `YYYY-MM` for a month
    pub fn label(&self) -> String {
        match self {
            ReportPeriod::Daily(day) => day.format("%Y-%m-%d").to_string(),
            ReportPeriod::Monthly(first) => first.format("%Y-%m").to_string(),
        }
    }
}

/// Period plus class selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    pub period: ReportPeriod,
    /// None = all classes
    pub class_name: Option<String>,
}

impl ReportQuery {
    /// Build a query from loose string parameters.
    ///
    /// Missing `date`/`month` default to `today` (or today's month).
    pub fn from_params(
        period: Option<&str>,
        date: Option<&str>,
        month: Option<&str>,
        class: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self> {
        let kind = match non_blank(period) {
            Some(p) => p.parse::<PeriodKind>().map_err(|_| {
                AttendanceError::validation(format!(
                    "Invalid period '{}', expected daily or monthly",
                    p
                ))
            })?,
            None => PeriodKind::default(),
        };

        let period = match kind {
            PeriodKind::Daily => ReportPeriod::Daily(match non_blank(date) {
                Some(d) => parse_date(&d)?,
                None => today,
            }),
            PeriodKind::Monthly => ReportPeriod::Monthly(match non_blank(month) {
                Some(m) => parse_month(&m)?,
                None => month_bounds(today).0,
            }),
        };

        Ok(Self {
            period,
            class_name: class_selection(class),
        })
    }
}

/// Names printed under the signature lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Signatories {
    pub headmaster_name: String,
    pub headmaster_nip: String,
    pub teacher_name: String,
    pub teacher_nip: String,
}

impl From<&ClassRecord> for Signatories {
    fn from(class: &ClassRecord) -> Self {
        Self {
            headmaster_name: class.headmaster_name.clone(),
            headmaster_nip: class.headmaster_nip.clone(),
            teacher_name: class.teacher_name.clone(),
            teacher_nip: class.teacher_nip.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub no: usize,
    pub nis: String,
    pub name: String,
    pub class_name: String,
    pub status: AttendanceStatus,
    pub date: NaiveDate,
    /// `-` when empty
    pub note: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceReport {
    pub school_name: String,
    pub period: PeriodKind,
    pub period_label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub class_name: Option<String>,
    pub rows: Vec<ReportRow>,
    pub summary: StatusCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signatories: Option<Signatories>,
}

impl AttendanceReport {
    /// Assemble a report from joined attendance rows already limited to the
    /// query's date range.
    pub fn build(
        school_name: &str,
        query: &ReportQuery,
        records: Vec<AttendanceWithStudent>,
        class: Option<&ClassRecord>,
    ) -> Self {
        let (start, end) = query.period.range();
        let rows = build_rows(records, query.class_name.as_deref(), start, end);
        let summary: StatusCounts = rows.iter().map(|r| r.status).collect();

        Self {
            school_name: school_name.to_string(),
            period: query.period.kind(),
            period_label: query.period.label(),
            start,
            end,
            class_name: query.class_name.clone(),
            rows,
            summary,
            signatories: class.map(Signatories::from),
        }
    }

    /// `Laporan_<school>_<unix millis>.pdf`
    pub fn pdf_file_name(&self, unix_millis: i64) -> String {
        format!("Laporan_{}_{}.pdf", file_safe(&self.school_name), unix_millis)
    }

    pub fn csv_file_name(&self, unix_millis: i64) -> String {
        format!("Laporan_{}_{}.csv", file_safe(&self.school_name), unix_millis)
    }
}

/// 文件名中去掉路径分隔符和引号
fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | '"' | ':' | '*' | '?' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Filter by class and date range, order by date, class, name and number rows from 1.
pub fn build_rows(
    records: Vec<AttendanceWithStudent>,
    class_name: Option<&str>,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<ReportRow> {
    let mut selected: Vec<AttendanceWithStudent> = records
        .into_iter()
        .filter(|r| r.attendance.date >= start && r.attendance.date <= end)
        .filter(|r| class_name.is_none_or(|c| r.student.class_name == c))
        .collect();

    selected.sort_by(|a, b| {
        a.attendance
            .date
            .cmp(&b.attendance.date)
            .then_with(|| a.student.class_name.cmp(&b.student.class_name))
            .then_with(|| a.student.name.cmp(&b.student.name))
    });

    selected
        .into_iter()
        .enumerate()
        .map(|(i, r)| ReportRow {
            no: i + 1,
            nis: r.student.nis,
            name: r.student.name,
            class_name: r.student.class_name,
            status: r.attendance.status,
            date: r.attendance.date,
            note: non_blank(r.attendance.note.as_deref()).unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}
