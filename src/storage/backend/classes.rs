//! Class queries and mutations

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    TransactionTrait, sea_query::Expr,
};
use tracing::info;

use super::converters::{class_to_active_model, model_to_class};
use super::{SeaOrmStorage, map_write_error, retry};
use crate::errors::{AttendanceError, Result};
use crate::storage::ClassRecord;
use migration::entities::{class, student};

impl SeaOrmStorage {
    /// 全部班级，按名称排序
    pub async fn list_classes(&self) -> Result<Vec<ClassRecord>> {
        let db = &self.db;
        let models = retry::with_retry("list_classes", self.retry_config, || async {
            class::Entity::find()
                .order_by_asc(class::Column::Name)
                .all(db)
                .await
        })
        .await?;

        Ok(models.into_iter().map(model_to_class).collect())
    }

    pub async fn get_class(&self, id: &str) -> Result<Option<ClassRecord>> {
        let db = &self.db;
        let id = id.to_string();
        let model = retry::with_retry("get_class", self.retry_config, || async {
            class::Entity::find_by_id(id.clone()).one(db).await
        })
        .await?;

        Ok(model.map(model_to_class))
    }

    pub async fn find_class_by_name(&self, name: &str) -> Result<Option<ClassRecord>> {
        let db = &self.db;
        let model = retry::with_retry("find_class_by_name", self.retry_config, || async {
            class::Entity::find()
                .filter(class::Column::Name.eq(name))
                .one(db)
                .await
        })
        .await?;

        Ok(model.map(model_to_class))
    }

    pub async fn count_classes(&self) -> Result<u64> {
        let db = &self.db;
        let count = retry::with_retry("count_classes", self.retry_config, || async {
            class::Entity::find().count(db).await
        })
        .await?;
        Ok(count)
    }

    pub async fn count_students_in_class(&self, class_name: &str) -> Result<u64> {
        let db = &self.db;
        let count = retry::with_retry("count_students_in_class", self.retry_config, || async {
            student::Entity::find()
                .filter(student::Column::ClassName.eq(class_name))
                .count(db)
                .await
        })
        .await?;
        Ok(count)
    }

    pub async fn insert_class(&self, record: &ClassRecord) -> Result<()> {
        class::Entity::insert(class_to_active_model(record))
            .exec(&self.db)
            .await
            .map_err(|e| map_write_error(e, "创建班级"))?;

        info!("Class created: {} ({})", record.name, record.id);
        Ok(())
    }

    /// 更新班级；名称变化时同步更新学生的 class_name（同一事务）
    pub async fn update_class(&self, record: &ClassRecord, previous_name: &str) -> Result<()> {
        let txn = self.db.begin().await.map_err(|e| {
            AttendanceError::database_operation(format!("开始事务失败: {}", e))
        })?;

        class_to_active_model(record)
            .update(&txn)
            .await
            .map_err(|e| map_write_error(e, "更新班级"))?;

        if previous_name != record.name {
            let renamed = student::Entity::update_many()
                .col_expr(student::Column::ClassName, Expr::value(record.name.clone()))
                .filter(student::Column::ClassName.eq(previous_name))
                .exec(&txn)
                .await
                .map_err(|e| map_write_error(e, "更新学生班级"))?;

            info!(
                "Class renamed '{}' -> '{}', {} students moved",
                previous_name, record.name, renamed.rows_affected
            );
        }

        txn.commit()
            .await
            .map_err(|e| AttendanceError::database_operation(format!("提交事务失败: {}", e)))?;

        Ok(())
    }

    /// 删除班级，返回是否存在
    pub async fn delete_class(&self, id: &str) -> Result<bool> {
        let result = class::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| map_write_error(e, "删除班级"))?;

        if result.rows_affected > 0 {
            info!("Class deleted: {}", id);
        }
        Ok(result.rows_affected > 0)
    }
}
