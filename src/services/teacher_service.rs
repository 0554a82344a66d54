//! Teacher management service

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::errors::{AttendanceError, Result};
use crate::storage::models::new_id;
use crate::storage::{SeaOrmStorage, Teacher};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeacherForm {
    pub name: String,
    #[serde(default)]
    pub nip: String,
    #[serde(default)]
    pub role: String,
}

impl TeacherForm {
    fn into_teacher(self, id: String) -> Result<Teacher> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(AttendanceError::validation("Teacher name is required"));
        }
        Ok(Teacher {
            id,
            nip: self.nip.trim().to_string(),
            name,
            role: self.role.trim().to_string(),
        })
    }
}

pub struct TeacherService {
    storage: Arc<SeaOrmStorage>,
}

impl TeacherService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        self.storage.list_teachers().await
    }

    pub async fn get_teacher(&self, id: &str) -> Result<Teacher> {
        self.storage
            .get_teacher(id)
            .await?
            .ok_or_else(|| AttendanceError::not_found(format!("Teacher '{}' not found", id)))
    }

    pub async fn create_teacher(&self, form: TeacherForm) -> Result<Teacher> {
        let teacher = form.into_teacher(new_id())?;
        self.storage.insert_teacher(&teacher).await?;
        info!("TeacherService: created teacher '{}'", teacher.name);
        Ok(teacher)
    }

    pub async fn update_teacher(&self, id: &str, form: TeacherForm) -> Result<Teacher> {
        let existing = self.get_teacher(id).await?;
        let teacher = form.into_teacher(existing.id)?;
        self.storage.update_teacher(&teacher).await?;
        Ok(teacher)
    }

    pub async fn delete_teacher(&self, id: &str) -> Result<()> {
        if !self.storage.delete_teacher(id).await? {
            return Err(AttendanceError::not_found(format!(
                "Teacher '{}' not found",
                id
            )));
        }
        info!("TeacherService: deleted teacher '{}'", id);
        Ok(())
    }
}
