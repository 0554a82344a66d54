//! API 帮助函数

use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::error;

use crate::errors::AttendanceError;
use crate::utils::{non_blank, parse_date, school_today};

use super::error_code::ErrorCode;
use super::types::ApiResponse;

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse {
        code: code as i32,
        message: message.into(),
        data,
    })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

/// 201 Created
pub fn created_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::CREATED, ErrorCode::Success, "Created", Some(data))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 AttendanceError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
pub fn error_from_attendance(err: &AttendanceError) -> HttpResponse {
    let status = err.http_status();
    if status.is_server_error() {
        error!("API error {}: {}", err.code(), err);
    }
    error_response(status, ErrorCode::from(err), err.message())
}

/// 统一 Result → HttpResponse 转换（成功 200）
pub fn api_result<T: Serialize>(result: Result<T, AttendanceError>) -> HttpResponse {
    match result {
        Ok(data) => success_response(data),
        Err(e) => error_from_attendance(&e),
    }
}

/// 统一 Result → HttpResponse 转换（成功 201）
pub fn created_result<T: Serialize>(result: Result<T, AttendanceError>) -> HttpResponse {
    match result {
        Ok(data) => created_response(data),
        Err(e) => error_from_attendance(&e),
    }
}

/// JSON body 提取配置：反序列化失败也走统一错误信封
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let response = error_from_attendance(&AttendanceError::validation(format!(
                "Invalid request body: {}",
                err
            )));
            InternalError::from_response(err, response).into()
        })
}

/// 可选日期参数，缺省为学校时区的今天
pub fn date_or_today(raw: Option<&str>) -> Result<NaiveDate, AttendanceError> {
    match non_blank(raw) {
        Some(d) => parse_date(&d),
        None => Ok(school_today()),
    }
}

/// 下载响应
pub fn attachment_response(content_type: &str, file_name: &str, body: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(content_type)
        .insert_header((
            actix_web::http::header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        ))
        .body(body)
}
