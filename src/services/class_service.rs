//! Class management service

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::errors::{AttendanceError, Result};
use crate::storage::models::new_id;
use crate::storage::{ClassRecord, SeaOrmStorage};

/// Create/update payload for a class
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassForm {
    pub name: String,
    #[serde(default)]
    pub teacher_name: String,
    #[serde(default)]
    pub teacher_nip: String,
    #[serde(default)]
    pub headmaster_name: String,
    #[serde(default)]
    pub headmaster_nip: String,
}

impl ClassForm {
    fn into_record(self, id: String) -> Result<ClassRecord> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(AttendanceError::validation("Class name is required"));
        }

        Ok(ClassRecord {
            id,
            name,
            teacher_name: self.teacher_name.trim().to_string(),
            teacher_nip: self.teacher_nip.trim().to_string(),
            headmaster_name: self.headmaster_name.trim().to_string(),
            headmaster_nip: self.headmaster_nip.trim().to_string(),
        })
    }
}

pub struct ClassService {
    storage: Arc<SeaOrmStorage>,
}

impl ClassService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn list_classes(&self) -> Result<Vec<ClassRecord>> {
        self.storage.list_classes().await
    }

    pub async fn get_class(&self, id: &str) -> Result<ClassRecord> {
        self.storage
            .get_class(id)
            .await?
            .ok_or_else(|| AttendanceError::not_found(format!("Class '{}' not found", id)))
    }

    /// Look up a class by its display name
    pub async fn find_by_name(&self, name: &str) -> Result<Option<ClassRecord>> {
        self.storage.find_class_by_name(name).await
    }

    pub async fn create_class(&self, form: ClassForm) -> Result<ClassRecord> {
        let record = form.into_record(new_id())?;

        if self.storage.find_class_by_name(&record.name).await?.is_some() {
            return Err(AttendanceError::conflict(format!(
                "Class '{}' already exists",
                record.name
            )));
        }

        self.storage.insert_class(&record).await?;
        info!("ClassService: created class '{}'", record.name);
        Ok(record)
    }

    /// Update a class; a rename carries its students along.
    pub async fn update_class(&self, id: &str, form: ClassForm) -> Result<ClassRecord> {
        let existing = self.get_class(id).await?;
        let record = form.into_record(existing.id.clone())?;

        if record.name != existing.name
            && let Some(other) = self.storage.find_class_by_name(&record.name).await?
            && other.id != existing.id
        {
            return Err(AttendanceError::conflict(format!(
                "Class '{}' already exists",
                record.name
            )));
        }

        self.storage.update_class(&record, &existing.name).await?;
        info!("ClassService: updated class '{}'", record.name);
        Ok(record)
    }

    /// Delete a class; refused while students still belong to it.
    pub async fn delete_class(&self, id: &str) -> Result<()> {
        let existing = self.get_class(id).await?;

        let students = self.storage.count_students_in_class(&existing.name).await?;
        if students > 0 {
            return Err(AttendanceError::conflict(format!(
                "Class '{}' still has {} students; move or delete them first",
                existing.name, students
            )));
        }

        if !self.storage.delete_class(id).await? {
            return Err(AttendanceError::not_found(format!("Class '{}' not found", id)));
        }
        info!("ClassService: deleted class '{}'", existing.name);
        Ok(())
    }
}
