//! 考勤表迁移
//!
//! - attendance: 学生每日考勤，(student_id, date) 唯一，删除学生时级联删除
//! - teacher_attendance: 教师每日考勤，(teacher_id, date) 唯一，删除教师时级联删除

use sea_orm_migration::prelude::*;

use crate::m20261001_000001_school_tables::{Students, Teachers};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. attendance
        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attendance::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Attendance::StudentId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Attendance::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Attendance::Note).text().null())
                    .col(ColumnDef::new(Attendance::Date).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_student")
                            .from(Attendance::Table, Attendance::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 唯一索引：student_id + date（upsert 冲突目标）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendance_student_date")
                    .table(Attendance::Table)
                    .col(Attendance::StudentId)
                    .col(Attendance::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 索引：date（日报 / 月报范围查询）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendance_date")
                    .table(Attendance::Table)
                    .col(Attendance::Date)
                    .to_owned(),
            )
            .await?;

        // 2. teacher_attendance
        manager
            .create_table(
                Table::create()
                    .table(TeacherAttendance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeacherAttendance::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TeacherAttendance::TeacherId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherAttendance::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(TeacherAttendance::Note).text().null())
                    .col(ColumnDef::new(TeacherAttendance::Date).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teacher_attendance_teacher")
                            .from(TeacherAttendance::Table, TeacherAttendance::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_teacher_attendance_teacher_date")
                    .table(TeacherAttendance::Table)
                    .col(TeacherAttendance::TeacherId)
                    .col(TeacherAttendance::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TeacherAttendance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attendance::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Attendance {
    #[sea_orm(iden = "attendance")]
    Table,
    Id,
    StudentId,
    Status,
    Note,
    Date,
}

#[derive(DeriveIden)]
enum TeacherAttendance {
    #[sea_orm(iden = "teacher_attendance")]
    Table,
    Id,
    TeacherId,
    Status,
    Note,
    Date,
}
