//! Teacher attendance log

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{AttendanceError, Result};
use crate::storage::backend::TeacherLogWithTeacher;
use crate::storage::models::new_id;
use crate::storage::{AttendanceStatus, SeaOrmStorage, TeacherAttendance};

#[derive(Debug, Clone, Serialize)]
pub struct TeacherLogView {
    pub id: String,
    pub teacher_id: String,
    pub teacher_name: String,
    pub nip: String,
    pub role: String,
    pub status: AttendanceStatus,
    pub note: String,
    pub date: NaiveDate,
}

impl From<TeacherLogWithTeacher> for TeacherLogView {
    fn from(row: TeacherLogWithTeacher) -> Self {
        Self {
            id: row.log.id,
            teacher_id: row.teacher.id,
            teacher_name: row.teacher.name,
            nip: row.teacher.nip,
            role: row.teacher.role,
            status: row.log.status,
            note: row.log.note.unwrap_or_default(),
            date: row.log.date,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTeacherLog {
    pub teacher_id: String,
    #[serde(default)]
    pub status: AttendanceStatus,
    #[serde(default)]
    pub note: Option<String>,
    /// Defaults to today in the school's timezone
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

pub struct TeacherAttendanceService {
    storage: Arc<SeaOrmStorage>,
}

impl TeacherAttendanceService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn list_logs(&self, date: NaiveDate) -> Result<Vec<TeacherLogView>> {
        let rows = self.storage.teacher_logs_on(date).await?;
        Ok(rows.into_iter().map(TeacherLogView::from).collect())
    }

    pub async fn add_log(&self, req: NewTeacherLog) -> Result<TeacherLogView> {
        let date = req.date.unwrap_or_else(crate::utils::school_today);

        let teacher = self
            .storage
            .get_teacher(req.teacher_id.trim())
            .await?
            .ok_or_else(|| {
                AttendanceError::validation(format!("Unknown teacher '{}'", req.teacher_id))
            })?;

        if self
            .storage
            .find_teacher_log(&teacher.id, date)
            .await?
            .is_some()
        {
            return Err(AttendanceError::conflict(format!(
                "{} already has an attendance record on {}",
                teacher.name, date
            )));
        }

        let log = TeacherAttendance {
            id: new_id(),
            teacher_id: teacher.id.clone(),
            status: req.status,
            note: req.note,
            date,
        };
        self.storage.insert_teacher_log(&log).await?;
        info!(
            "TeacherAttendanceService: {} marked {} on {}",
            teacher.name, log.status, date
        );

        Ok(TeacherLogView::from(TeacherLogWithTeacher {
            log: TeacherAttendance {
                note: crate::utils::non_blank(log.note.as_deref()),
                ..log
            },
            teacher,
        }))
    }

    pub async fn delete_log(&self, id: &str) -> Result<()> {
        if !self.storage.delete_teacher_log(id).await? {
            return Err(AttendanceError::not_found(format!(
                "Teacher attendance record '{}' not found",
                id
            )));
        }
        Ok(())
    }
}
