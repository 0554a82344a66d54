//! school_settings 表（单行，id = "1"）

use sea_orm::{EntityTrait, sea_query::OnConflict};
use tracing::info;

use super::{SeaOrmStorage, retry};
use super::converters::{model_to_settings, settings_to_active_model};
use crate::errors::{AttendanceError, Result};
use crate::storage::SchoolSettings;
use migration::entities::school_settings;

/// 唯一设置行的主键
pub const SETTINGS_ROW_ID: &str = "1";

impl SeaOrmStorage {
    pub async fn get_settings(&self) -> Result<Option<SchoolSettings>> {
        let db = &self.db;
        let model = retry::with_retry("get_settings", self.retry_config, || async {
            school_settings::Entity::find_by_id(SETTINGS_ROW_ID.to_string())
                .one(db)
                .await
        })
        .await?;

        Ok(model.map(model_to_settings))
    }

    pub async fn upsert_settings(&self, school_name: &str) -> Result<SchoolSettings> {
        let settings = SchoolSettings {
            id: SETTINGS_ROW_ID.to_string(),
            school_name: school_name.to_string(),
        };

        school_settings::Entity::insert(settings_to_active_model(&settings))
            .on_conflict(
                OnConflict::column(school_settings::Column::Id)
                    .update_column(school_settings::Column::SchoolName)
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| AttendanceError::database_operation(format!("保存学校设置失败: {}", e)))?;

        info!("School settings updated: {}", settings.school_name);
        Ok(settings)
    }
}
