//! Student management service

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::errors::{AttendanceError, Result};
use crate::storage::models::new_id;
use crate::storage::{SeaOrmStorage, Student, StudentFilter, StudentStatus};

/// Create/update payload for a student
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentForm {
    pub nis: String,
    pub name: String,
    pub class_name: String,
    #[serde(default)]
    pub status: Option<StudentStatus>,
}

pub struct StudentService {
    storage: Arc<SeaOrmStorage>,
}

impl StudentService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn list_students(&self, filter: &StudentFilter) -> Result<Vec<Student>> {
        self.storage.list_students(filter).await
    }

    pub async fn get_student(&self, id: &str) -> Result<Student> {
        self.storage
            .get_student(id)
            .await?
            .ok_or_else(|| AttendanceError::not_found(format!("Student '{}' not found", id)))
    }

    /// Required fields, existing class, unique NIS (ignoring `self_id`).
    async fn validate(&self, form: &StudentForm, self_id: Option<&str>) -> Result<Student> {
        let nis = form.nis.trim();
        let name = form.name.trim();
        let class_name = form.class_name.trim();

        let mut missing = Vec::new();
        if nis.is_empty() {
            missing.push("nis");
        }
        if name.is_empty() {
            missing.push("name");
        }
        if class_name.is_empty() {
            missing.push("class_name");
        }
        if !missing.is_empty() {
            return Err(AttendanceError::validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        if self.storage.count_classes().await? == 0 {
            return Err(AttendanceError::validation(
                "No classes defined yet; add a class first",
            ));
        }
        if self.storage.find_class_by_name(class_name).await?.is_none() {
            return Err(AttendanceError::validation(format!(
                "Class '{}' does not exist",
                class_name
            )));
        }

        if let Some(other) = self.storage.find_student_by_nis(nis).await?
            && Some(other.id.as_str()) != self_id
        {
            return Err(AttendanceError::conflict(format!(
                "NIS '{}' is already used by {}",
                nis, other.name
            )));
        }

        Ok(Student {
            id: self_id.map(str::to_string).unwrap_or_else(new_id),
            nis: nis.to_string(),
            name: name.to_string(),
            class_name: class_name.to_string(),
            status: form.status.unwrap_or_default(),
        })
    }

    pub async fn create_student(&self, form: StudentForm) -> Result<Student> {
        let student = self.validate(&form, None).await?;
        self.storage.insert_student(&student).await?;
        info!(
            "StudentService: created student '{}' in '{}'",
            student.name, student.class_name
        );
        Ok(student)
    }

    pub async fn update_student(&self, id: &str, form: StudentForm) -> Result<Student> {
        let existing = self.get_student(id).await?;
        let mut student = self.validate(&form, Some(&existing.id)).await?;
        if form.status.is_none() {
            student.status = existing.status;
        }

        self.storage.update_student(&student).await?;
        info!("StudentService: updated student '{}'", student.id);
        Ok(student)
    }

    /// Delete a student together with their attendance history.
    pub async fn delete_student(&self, id: &str) -> Result<()> {
        if !self.storage.delete_student(id).await? {
            return Err(AttendanceError::not_found(format!(
                "Student '{}' not found",
                id
            )));
        }
        Ok(())
    }
}
