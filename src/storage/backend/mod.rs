//! SeaORM storage backend
//!
//! This module provides database storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod attendance;
mod classes;
mod connection;
mod converters;
pub mod retry;
mod settings;
mod students;
mod teacher_attendance;
mod teachers;

use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use tracing::warn;

use crate::errors::{AttendanceError, Result};

pub use attendance::{AttendanceWithStudent, StatusCountRow};
pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::*;
pub use settings::SETTINGS_ROW_ID;
pub use students::ClassCountRow;
pub use teacher_attendance::TeacherLogWithTeacher;

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(AttendanceError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// 将写操作的数据库错误映射为业务错误
///
/// 唯一约束冲突 -> Conflict，外键约束失败 -> Validation，其余 -> DatabaseOperation
pub(crate) fn map_write_error(err: DbErr, action: &str) -> AttendanceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            AttendanceError::conflict(format!("{}: 记录已存在 ({})", action, detail))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            AttendanceError::validation(format!("{}: 关联记录不存在 ({})", action, detail))
        }
        _ => AttendanceError::database_operation(format!("{}失败: {}", action, err)),
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    /// 重试配置
    retry_config: retry::RetryConfig,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(AttendanceError::database_config(
                "DATABASE_URL 未设置".to_string(),
            ));
        }

        // 读取重试配置
        let config = crate::config::get_config();
        let retry_config = retry::RetryConfig {
            max_retries: config.database.retry_count,
            base_delay_ms: config.database.retry_base_delay_ms,
            max_delay_ms: config.database.retry_max_delay_ms,
        };

        // 根据不同数据库类型配置连接选项
        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
            retry_config,
        };

        // 运行迁移
        run_migrations(&storage.db).await?;

        warn!(
            "{} Storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// 获取数据库连接
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// 关闭连接池
    pub async fn close(self) -> Result<()> {
        self.db
            .close()
            .await
            .map_err(|e| AttendanceError::database_connection(format!("关闭数据库连接失败: {}", e)))
    }
}
