//! School API 服务模块
//!
//! 包含设置、班级、学生、教师、出勤、仪表盘和报表端点。

pub mod attendance;
pub mod classes;
pub mod dashboard;
pub mod error_code;
mod helpers;
pub mod reports;
pub mod routes;
pub mod settings;
pub mod students;
pub mod teachers;
mod types;

// 重新导出类型
pub use types::*;

// 重新导出帮助函数
pub use helpers::{
    api_result, attachment_response, created_result, date_or_today, error_from_attendance,
    error_response, json_config, success_response,
};

// 重新导出错误码
pub use error_code::ErrorCode;

pub use routes::school_v1_routes;
