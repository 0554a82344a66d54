//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::AttendanceError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字。按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 存储错误
/// - 3000-3099: 报表错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    NotFound = 1004,
    InternalServerError = 1005,
    Conflict = 1009,
    InvalidDateFormat = 1012,
    ServiceUnavailable = 1030,

    // 存储错误 2000-2099
    DatabaseError = 2000,
    DatabaseConfigError = 2001,
    FileError = 2002,

    // 报表错误 3000-3099
    ReportGenerationFailed = 3000,
    SerializationFailed = 3001,
}

impl From<&AttendanceError> for ErrorCode {
    fn from(err: &AttendanceError) -> Self {
        match err {
            AttendanceError::Validation(_) => ErrorCode::BadRequest,
            AttendanceError::DateParse(_) => ErrorCode::InvalidDateFormat,
            AttendanceError::NotFound(_) => ErrorCode::NotFound,
            AttendanceError::Conflict(_) => ErrorCode::Conflict,
            AttendanceError::DatabaseConnection(_) => ErrorCode::ServiceUnavailable,
            AttendanceError::DatabaseOperation(_) => ErrorCode::DatabaseError,
            AttendanceError::DatabaseConfig(_) => ErrorCode::DatabaseConfigError,
            AttendanceError::FileOperation(_) => ErrorCode::FileError,
            AttendanceError::ReportGeneration(_) => ErrorCode::ReportGenerationFailed,
            AttendanceError::Serialization(_) => ErrorCode::SerializationFailed,
        }
    }
}
