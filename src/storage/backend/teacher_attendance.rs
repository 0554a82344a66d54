//! Teacher attendance log queries and mutations

use chrono::NaiveDate;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tracing::{info, warn};

use super::converters::{
    model_to_teacher, model_to_teacher_attendance, teacher_attendance_to_active_model,
};
use super::{SeaOrmStorage, map_write_error, retry};
use crate::errors::Result;
use crate::storage::{Teacher, TeacherAttendance};
use migration::entities::{teacher, teacher_attendance};

/// 教师出勤记录及教师信息
#[derive(Debug, Clone)]
pub struct TeacherLogWithTeacher {
    pub log: TeacherAttendance,
    pub teacher: Teacher,
}

impl SeaOrmStorage {
    /// 某天的教师出勤记录，按教师姓名排序
    pub async fn teacher_logs_on(&self, date: NaiveDate) -> Result<Vec<TeacherLogWithTeacher>> {
        let db = &self.db;
        let rows = retry::with_retry("teacher_logs_on", self.retry_config, || async {
            teacher_attendance::Entity::find()
                .find_also_related(teacher::Entity)
                .filter(teacher_attendance::Column::Date.eq(date))
                .all(db)
                .await
        })
        .await?;

        let mut logs: Vec<TeacherLogWithTeacher> = rows
            .into_iter()
            .filter_map(|(log, teacher)| match teacher {
                Some(teacher) => Some(TeacherLogWithTeacher {
                    log: model_to_teacher_attendance(log),
                    teacher: model_to_teacher(teacher),
                }),
                None => {
                    warn!("Teacher log {} references missing teacher", log.id);
                    None
                }
            })
            .collect();

        logs.sort_by(|a, b| a.teacher.name.cmp(&b.teacher.name));
        Ok(logs)
    }

    pub async fn find_teacher_log(
        &self,
        teacher_id: &str,
        date: NaiveDate,
    ) -> Result<Option<TeacherAttendance>> {
        let db = &self.db;
        let model = retry::with_retry("find_teacher_log", self.retry_config, || async {
            teacher_attendance::Entity::find()
                .filter(teacher_attendance::Column::TeacherId.eq(teacher_id))
                .filter(teacher_attendance::Column::Date.eq(date))
                .one(db)
                .await
        })
        .await?;
        Ok(model.map(model_to_teacher_attendance))
    }

    pub async fn insert_teacher_log(&self, record: &TeacherAttendance) -> Result<()> {
        teacher_attendance::Entity::insert(teacher_attendance_to_active_model(record))
            .exec(&self.db)
            .await
            .map_err(|e| map_write_error(e, "记录教师出勤"))?;

        info!(
            "Teacher attendance recorded: {} {} {}",
            record.teacher_id, record.date, record.status
        );
        Ok(())
    }

    pub async fn delete_teacher_log(&self, id: &str) -> Result<bool> {
        let result = teacher_attendance::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| map_write_error(e, "删除教师出勤记录"))?;
        Ok(result.rows_affected > 0)
    }
}
