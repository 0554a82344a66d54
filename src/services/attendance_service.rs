//! Daily student attendance: class roster and bulk save

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{AttendanceError, Result};
use crate::storage::models::new_id;
use crate::storage::{AttendanceStatus, SeaOrmStorage, StudentAttendance, StudentFilter};

/// One student on the roster for a given date
#[derive(Debug, Clone, Serialize)]
pub struct RosterEntry {
    pub student_id: String,
    pub nis: String,
    pub name: String,
    pub status: AttendanceStatus,
    pub note: String,
    /// false when no record exists yet and the defaults are shown
    pub recorded: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassRoster {
    pub class_name: String,
    pub date: NaiveDate,
    pub entries: Vec<RosterEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RosterMark {
    pub student_id: String,
    #[serde(default)]
    pub status: AttendanceStatus,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveRosterResult {
    pub date: NaiveDate,
    pub saved: usize,
}

pub struct AttendanceService {
    storage: Arc<SeaOrmStorage>,
}

impl AttendanceService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// Every student of `class_name` with their status on `date`.
    ///
    /// Students without a record default to `Hadir` with an empty note.
    pub async fn class_roster(&self, class_name: &str, date: NaiveDate) -> Result<ClassRoster> {
        let class_name = class_name.trim();
        if class_name.is_empty() {
            return Err(AttendanceError::validation("Class is required"));
        }
        if self.storage.find_class_by_name(class_name).await?.is_none() {
            return Err(AttendanceError::not_found(format!(
                "Class '{}' not found",
                class_name
            )));
        }

        let students = self
            .storage
            .list_students(&StudentFilter {
                search: None,
                class_name: Some(class_name.to_string()),
            })
            .await?;

        let ids: Vec<String> = students.iter().map(|s| s.id.clone()).collect();
        let mut recorded: HashMap<String, StudentAttendance> = self
            .storage
            .attendance_on(&ids, date)
            .await?
            .into_iter()
            .map(|a| (a.student_id.clone(), a))
            .collect();

        let entries = students
            .into_iter()
            .map(|student| match recorded.remove(&student.id) {
                Some(record) => RosterEntry {
                    student_id: student.id,
                    nis: student.nis,
                    name: student.name,
                    status: record.status,
                    note: record.note.unwrap_or_default(),
                    recorded: true,
                },
                None => RosterEntry {
                    student_id: student.id,
                    nis: student.nis,
                    name: student.name,
                    status: AttendanceStatus::default(),
                    note: String::new(),
                    recorded: false,
                },
            })
            .collect();

        Ok(ClassRoster {
            class_name: class_name.to_string(),
            date,
            entries,
        })
    }

    /// Upsert one record per `(student_id, date)` in a single transaction.
    pub async fn save_roster(
        &self,
        date: NaiveDate,
        marks: Vec<RosterMark>,
    ) -> Result<SaveRosterResult> {
        if marks.is_empty() {
            return Err(AttendanceError::validation("No attendance entries to save"));
        }

        let mut seen = HashSet::with_capacity(marks.len());
        let mut duplicates = Vec::new();
        for mark in &marks {
            if !seen.insert(mark.student_id.as_str()) {
                duplicates.push(mark.student_id.clone());
            }
        }
        if !duplicates.is_empty() {
            return Err(AttendanceError::validation(format!(
                "Duplicate student ids in request: {}",
                duplicates.join(", ")
            )));
        }

        let ids: Vec<String> = marks.iter().map(|m| m.student_id.clone()).collect();
        let known: HashSet<String> = self
            .storage
            .students_by_ids(&ids)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();
        let unknown: Vec<&str> = ids
            .iter()
            .filter(|id| !known.contains(*id))
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            return Err(AttendanceError::validation(format!(
                "Unknown student ids: {}",
                unknown.join(", ")
            )));
        }

        let records: Vec<StudentAttendance> = marks
            .into_iter()
            .map(|mark| StudentAttendance {
                id: new_id(),
                student_id: mark.student_id,
                status: mark.status,
                note: mark.note,
                date,
            })
            .collect();

        self.storage.upsert_attendance(&records).await?;
        info!(
            "AttendanceService: saved {} attendance records for {}",
            records.len(),
            date
        );

        Ok(SaveRosterResult {
            date,
            saved: records.len(),
        })
    }
}
