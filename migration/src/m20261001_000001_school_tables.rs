//! 基础数据表迁移
//!
//! 创建学校主数据表：
//! - school_settings: 学校设置（单行，id = "1"）
//! - classes: 班级（名称唯一）
//! - students: 学生（NIS 唯一，按班级名称关联）
//! - teachers: 教师

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 1. school_settings
        manager
            .create_table(
                Table::create()
                    .table(SchoolSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SchoolSettings::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SchoolSettings::SchoolName)
                            .string_len(255)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 2. classes
        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Classes::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Classes::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Classes::TeacherName)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Classes::TeacherNip)
                            .string_len(64)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Classes::HeadmasterName)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Classes::HeadmasterNip)
                            .string_len(64)
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_classes_name")
                    .table(Classes::Table)
                    .col(Classes::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 3. students
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::Nis).string_len(64).not_null())
                    .col(ColumnDef::new(Students::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Students::ClassName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Students::Status)
                            .string_len(16)
                            .not_null()
                            .default("active"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_nis")
                    .table(Students::Table)
                    .col(Students::Nis)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 按班级查询花名册
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_class_name")
                    .table(Students::Table)
                    .col(Students::ClassName)
                    .to_owned(),
            )
            .await?;

        // 4. teachers
        manager
            .create_table(
                Table::create()
                    .table(Teachers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teachers::Id)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Teachers::Nip)
                            .string_len(64)
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Teachers::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Teachers::Role)
                            .string_len(255)
                            .not_null()
                            .default(""),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Classes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SchoolSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SchoolSettings {
    #[sea_orm(iden = "school_settings")]
    Table,
    Id,
    SchoolName,
}

#[derive(DeriveIden)]
enum Classes {
    #[sea_orm(iden = "classes")]
    Table,
    Id,
    Name,
    TeacherName,
    TeacherNip,
    HeadmasterName,
    HeadmasterNip,
}

#[derive(DeriveIden)]
pub(crate) enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    Nis,
    Name,
    ClassName,
    Status,
}

#[derive(DeriveIden)]
pub(crate) enum Teachers {
    #[sea_orm(iden = "teachers")]
    Table,
    Id,
    Nip,
    Name,
    Role,
}
