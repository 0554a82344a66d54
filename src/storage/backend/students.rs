//! Student queries and mutations

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ExprTrait, FromQueryResult,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    sea_query::{Expr, Func, LikeExpr},
};
use tracing::info;

use super::converters::{model_to_student, student_to_active_model};
use super::{SeaOrmStorage, map_write_error, retry};
use crate::errors::{AttendanceError, Result};
use crate::storage::{Student, StudentFilter};
use migration::entities::{student, student_attendance};

const LIKE_ESCAPE: char = '\\';

/// 转义 LIKE 通配符，让搜索词按字面匹配
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

/// 每个班级的学生人数
#[derive(Debug, FromQueryResult)]
pub struct ClassCountRow {
    pub class_name: String,
    pub count: i64,
}

impl SeaOrmStorage {
    /// 按姓名排序的学生列表
    pub async fn list_students(&self, filter: &StudentFilter) -> Result<Vec<Student>> {
        let mut condition = Condition::all();

        // search: 姓名不区分大小写，NIS 子串；按字面匹配，不做通配
        if let Some(search) = filter.search.as_deref()
            && !search.is_empty()
        {
            let name_pattern = format!("%{}%", escape_like(&search.to_lowercase()));
            let nis_pattern = format!("%{}%", escape_like(search));
            condition = condition.add(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(student::Column::Name)))
                            .like(LikeExpr::new(name_pattern).escape(LIKE_ESCAPE)),
                    )
                    .add(
                        Expr::col(student::Column::Nis)
                            .like(LikeExpr::new(nis_pattern).escape(LIKE_ESCAPE)),
                    ),
            );
        }

        if let Some(ref class_name) = filter.class_name {
            condition = condition.add(student::Column::ClassName.eq(class_name.as_str()));
        }

        let db = &self.db;
        let models = retry::with_retry("list_students", self.retry_config, || async {
            student::Entity::find()
                .filter(condition.clone())
                .order_by_asc(student::Column::Name)
                .all(db)
                .await
        })
        .await?;

        Ok(models.into_iter().map(model_to_student).collect())
    }

    pub async fn get_student(&self, id: &str) -> Result<Option<Student>> {
        let db = &self.db;
        let model = retry::with_retry("get_student", self.retry_config, || async {
            student::Entity::find_by_id(id.to_string()).one(db).await
        })
        .await?;
        Ok(model.map(model_to_student))
    }

    pub async fn find_student_by_nis(&self, nis: &str) -> Result<Option<Student>> {
        let db = &self.db;
        let model = retry::with_retry("find_student_by_nis", self.retry_config, || async {
            student::Entity::find()
                .filter(student::Column::Nis.eq(nis))
                .one(db)
                .await
        })
        .await?;
        Ok(model.map(model_to_student))
    }

    /// 按 ID 批量查询（不存在的 ID 直接忽略）
    pub async fn students_by_ids(&self, ids: &[String]) -> Result<Vec<Student>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let db = &self.db;
        let models = retry::with_retry("students_by_ids", self.retry_config, || async {
            student::Entity::find()
                .filter(student::Column::Id.is_in(ids.iter().cloned()))
                .all(db)
                .await
        })
        .await?;
        Ok(models.into_iter().map(model_to_student).collect())
    }

    /// 每个出现在学生表里的班级名及其人数，按班级名排序
    pub async fn student_counts_by_class(&self) -> Result<Vec<ClassCountRow>> {
        let db = &self.db;
        let rows = retry::with_retry("student_counts_by_class", self.retry_config, || async {
            student::Entity::find()
                .select_only()
                .column(student::Column::ClassName)
                .column_as(student::Column::Id.count(), "count")
                .group_by(student::Column::ClassName)
                .order_by_asc(student::Column::ClassName)
                .into_model::<ClassCountRow>()
                .all(db)
                .await
        })
        .await?;
        Ok(rows)
    }

    pub async fn insert_student(&self, record: &Student) -> Result<()> {
        student::Entity::insert(student_to_active_model(record))
            .exec(&self.db)
            .await
            .map_err(|e| map_write_error(e, "创建学生"))?;

        info!("Student created: {} (NIS {})", record.name, record.nis);
        Ok(())
    }

    pub async fn update_student(&self, record: &Student) -> Result<()> {
        student_to_active_model(record)
            .update(&self.db)
            .await
            .map_err(|e| map_write_error(e, "更新学生"))?;

        info!("Student updated: {}", record.id);
        Ok(())
    }

    /// 删除学生及其全部出勤记录（同一事务），返回是否存在
    pub async fn delete_student(&self, id: &str) -> Result<bool> {
        let txn = self.db.begin().await.map_err(|e| {
            AttendanceError::database_operation(format!("开始事务失败: {}", e))
        })?;

        let logs = student_attendance::Entity::delete_many()
            .filter(student_attendance::Column::StudentId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| map_write_error(e, "删除学生出勤记录"))?;

        let result = student::Entity::delete_by_id(id.to_string())
            .exec(&txn)
            .await
            .map_err(|e| map_write_error(e, "删除学生"))?;

        txn.commit()
            .await
            .map_err(|e| AttendanceError::database_operation(format!("提交事务失败: {}", e)))?;

        if result.rows_affected > 0 {
            info!(
                "Student deleted: {} ({} attendance rows removed)",
                id, logs.rows_affected
            );
        }
        Ok(result.rows_affected > 0)
    }
}
