use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum AttendanceError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    NotFound(String),
    Conflict(String),
    Serialization(String),
    DateParse(String),
    ReportGeneration(String),
}

impl AttendanceError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            AttendanceError::DatabaseConfig(_) => "E001",
            AttendanceError::DatabaseConnection(_) => "E002",
            AttendanceError::DatabaseOperation(_) => "E003",
            AttendanceError::FileOperation(_) => "E004",
            AttendanceError::Validation(_) => "E005",
            AttendanceError::NotFound(_) => "E006",
            AttendanceError::Conflict(_) => "E007",
            AttendanceError::Serialization(_) => "E008",
            AttendanceError::DateParse(_) => "E009",
            AttendanceError::ReportGeneration(_) => "E010",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            AttendanceError::DatabaseConfig(_) => "Database Configuration Error",
            AttendanceError::DatabaseConnection(_) => "Database Connection Error",
            AttendanceError::DatabaseOperation(_) => "Database Operation Error",
            AttendanceError::FileOperation(_) => "File Operation Error",
            AttendanceError::Validation(_) => "Validation Error",
            AttendanceError::NotFound(_) => "Resource Not Found",
            AttendanceError::Conflict(_) => "Resource Conflict",
            AttendanceError::Serialization(_) => "Serialization Error",
            AttendanceError::DateParse(_) => "Date Parse Error",
            AttendanceError::ReportGeneration(_) => "Report Generation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            AttendanceError::DatabaseConfig(msg)
            | AttendanceError::DatabaseConnection(msg)
            | AttendanceError::DatabaseOperation(msg)
            | AttendanceError::FileOperation(msg)
            | AttendanceError::Validation(msg)
            | AttendanceError::NotFound(msg)
            | AttendanceError::Conflict(msg)
            | AttendanceError::Serialization(msg)
            | AttendanceError::DateParse(msg)
            | AttendanceError::ReportGeneration(msg) => msg,
        }
    }

    /// HTTP 状态码映射
    pub fn http_status(&self) -> StatusCode {
        match self {
            AttendanceError::Validation(_) | AttendanceError::DateParse(_) => {
                StatusCode::BAD_REQUEST
            }
            AttendanceError::NotFound(_) => StatusCode::NOT_FOUND,
            AttendanceError::Conflict(_) => StatusCode::CONFLICT,
            AttendanceError::DatabaseConnection(_) => StatusCode::SERVICE_UNAVAILABLE,
            AttendanceError::DatabaseConfig(_)
            | AttendanceError::DatabaseOperation(_)
            | AttendanceError::FileOperation(_)
            | AttendanceError::Serialization(_)
            | AttendanceError::ReportGeneration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for AttendanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 默认使用简洁格式
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AttendanceError {}

// 便捷的构造函数
impl AttendanceError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        AttendanceError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        AttendanceError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        AttendanceError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        AttendanceError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        AttendanceError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        AttendanceError::NotFound(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        AttendanceError::Conflict(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        AttendanceError::Serialization(msg.into())
    }

    pub fn date_parse<T: Into<String>>(msg: T) -> Self {
        AttendanceError::DateParse(msg.into())
    }

    pub fn report_generation<T: Into<String>>(msg: T) -> Self {
        AttendanceError::ReportGeneration(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for AttendanceError {
    fn from(err: sea_orm::DbErr) -> Self {
        AttendanceError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for AttendanceError {
    fn from(err: std::io::Error) -> Self {
        AttendanceError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AttendanceError {
    fn from(err: serde_json::Error) -> Self {
        AttendanceError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for AttendanceError {
    fn from(err: chrono::ParseError) -> Self {
        AttendanceError::DateParse(err.to_string())
    }
}

impl From<csv::Error> for AttendanceError {
    fn from(err: csv::Error) -> Self {
        AttendanceError::ReportGeneration(format!("CSV: {}", err))
    }
}

impl From<printpdf::Error> for AttendanceError {
    fn from(err: printpdf::Error) -> Self {
        AttendanceError::ReportGeneration(format!("PDF: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, AttendanceError>;
