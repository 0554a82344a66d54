//! Student attendance queries and mutations

use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait, sea_query::OnConflict,
};
use tracing::{info, warn};

use super::converters::{attendance_to_active_model, model_to_attendance, model_to_student};
use super::{SeaOrmStorage, map_write_error, retry};
use crate::errors::Result;
use crate::storage::{AttendanceStatus, Student, StudentAttendance};
use migration::entities::{student, student_attendance};

/// 出勤记录及其学生
#[derive(Debug, Clone)]
pub struct AttendanceWithStudent {
    pub attendance: StudentAttendance,
    pub student: Student,
}

/// 按状态聚合的出勤数
#[derive(Debug, FromQueryResult)]
pub struct StatusCountRow {
    pub status: String,
    pub count: i64,
}

impl SeaOrmStorage {
    /// 指定学生在某一天的出勤记录
    pub async fn attendance_on(
        &self,
        student_ids: &[String],
        date: NaiveDate,
    ) -> Result<Vec<StudentAttendance>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        let db = &self.db;
        let models = retry::with_retry("attendance_on", self.retry_config, || async {
            student_attendance::Entity::find()
                .filter(student_attendance::Column::StudentId.is_in(student_ids.iter().cloned()))
                .filter(student_attendance::Column::Date.eq(date))
                .all(db)
                .await
        })
        .await?;

        Ok(models.into_iter().map(model_to_attendance).collect())
    }

    /// 批量 upsert，(student_id, date) 冲突时更新状态和备注；整体一个事务
    pub async fn upsert_attendance(&self, records: &[StudentAttendance]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let models: Vec<student_attendance::ActiveModel> =
            records.iter().map(attendance_to_active_model).collect();
        let db = &self.db;

        retry::with_retry("upsert_attendance", self.retry_config, || {
            let models = models.clone();
            async move {
                let txn = db.begin().await?;
                student_attendance::Entity::insert_many(models)
                    .on_conflict(
                        OnConflict::columns([
                            student_attendance::Column::StudentId,
                            student_attendance::Column::Date,
                        ])
                        .update_columns([
                            student_attendance::Column::Status,
                            student_attendance::Column::Note,
                        ])
                        .to_owned(),
                    )
                    .exec(&txn)
                    .await?;
                txn.commit().await
            }
        })
        .await
        .map_err(|e| map_write_error(e, "保存出勤记录"))?;

        info!("Attendance saved: {} rows", records.len());
        Ok(())
    }

    /// [start, end] 区间内的出勤记录及学生，按日期排序
    pub async fn attendance_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AttendanceWithStudent>> {
        let db = &self.db;
        let rows = retry::with_retry("attendance_between", self.retry_config, || async {
            student_attendance::Entity::find()
                .find_also_related(student::Entity)
                .filter(student_attendance::Column::Date.between(start, end))
                .order_by_asc(student_attendance::Column::Date)
                .all(db)
                .await
        })
        .await?;

        let mut joined = Vec::with_capacity(rows.len());
        for (attendance, student) in rows {
            match student {
                Some(student) => joined.push(AttendanceWithStudent {
                    attendance: model_to_attendance(attendance),
                    student: model_to_student(student),
                }),
                None => warn!(
                    "Attendance {} references missing student {}",
                    attendance.id, attendance.student_id
                ),
            }
        }
        Ok(joined)
    }

    /// 某天各状态的记录数
    pub async fn status_counts_on(&self, date: NaiveDate) -> Result<Vec<StatusCountRow>> {
        let db = &self.db;
        let rows = retry::with_retry("status_counts_on", self.retry_config, || async {
            student_attendance::Entity::find()
                .select_only()
                .column(student_attendance::Column::Status)
                .column_as(student_attendance::Column::Id.count(), "count")
                .filter(student_attendance::Column::Date.eq(date))
                .group_by(student_attendance::Column::Status)
                .into_model::<StatusCountRow>()
                .all(db)
                .await
        })
        .await?;
        Ok(rows)
    }

    /// [start, end] 区间内每条指定状态记录的日期
    pub async fn dates_with_status(
        &self,
        status: AttendanceStatus,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<NaiveDate>> {
        let db = &self.db;
        let dates = retry::with_retry("dates_with_status", self.retry_config, || async {
            student_attendance::Entity::find()
                .select_only()
                .column(student_attendance::Column::Date)
                .filter(student_attendance::Column::Status.eq(status.as_ref()))
                .filter(student_attendance::Column::Date.between(start, end))
                .into_tuple::<NaiveDate>()
                .all(db)
                .await
        })
        .await?;
        Ok(dates)
    }
}
