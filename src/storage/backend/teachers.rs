//! Teacher queries and mutations

use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder};
use tracing::info;

use super::converters::{model_to_teacher, teacher_to_active_model};
use super::{SeaOrmStorage, map_write_error, retry};
use crate::errors::Result;
use crate::storage::Teacher;
use migration::entities::teacher;

impl SeaOrmStorage {
    pub async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        let db = &self.db;
        let models = retry::with_retry("list_teachers", self.retry_config, || async {
            teacher::Entity::find()
                .order_by_asc(teacher::Column::Name)
                .all(db)
                .await
        })
        .await?;

        Ok(models.into_iter().map(model_to_teacher).collect())
    }

    pub async fn get_teacher(&self, id: &str) -> Result<Option<Teacher>> {
        let db = &self.db;
        let model = retry::with_retry("get_teacher", self.retry_config, || async {
            teacher::Entity::find_by_id(id.to_string()).one(db).await
        })
        .await?;
        Ok(model.map(model_to_teacher))
    }

    pub async fn insert_teacher(&self, record: &Teacher) -> Result<()> {
        teacher::Entity::insert(teacher_to_active_model(record))
            .exec(&self.db)
            .await
            .map_err(|e| map_write_error(e, "创建教师"))?;

        info!("Teacher created: {} ({})", record.name, record.id);
        Ok(())
    }

    pub async fn update_teacher(&self, record: &Teacher) -> Result<()> {
        teacher_to_active_model(record)
            .update(&self.db)
            .await
            .map_err(|e| map_write_error(e, "更新教师"))?;
        Ok(())
    }

    /// 删除教师；出勤记录由外键级联删除
    pub async fn delete_teacher(&self, id: &str) -> Result<bool> {
        let result = teacher::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| map_write_error(e, "删除教师"))?;

        if result.rows_affected > 0 {
            info!("Teacher deleted: {}", id);
        }
        Ok(result.rows_affected > 0)
    }
}
