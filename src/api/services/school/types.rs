//! API 请求/响应类型

use serde::{Deserialize, Serialize};

/// 统一响应信封；错误时省略 data
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateSettingsRequest {
    pub school_name: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct StudentListQuery {
    pub search: Option<String>,
    pub class: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct RosterQuery {
    pub class: Option<String>,
    pub date: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct SaveRosterRequest {
    pub date: Option<String>,
    pub entries: Vec<crate::services::RosterMark>,
}

#[derive(Deserialize, Debug, Default)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ReportParams {
    pub period: Option<String>,
    pub date: Option<String>,
    pub month: Option<String>,
    pub class: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct DeletedResponse {
    pub id: String,
}
