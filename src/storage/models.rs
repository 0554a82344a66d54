use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// 出勤状态
///
/// 序列化为原样的印尼语单词；解析时不区分大小写。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum AttendanceStatus {
    /// 出席
    #[default]
    Hadir,
    /// 病假
    Sakit,
    /// 事假
    Izin,
    /// 无故缺席
    Alfa,
}

impl AttendanceStatus {
    /// 解析数据库中的状态值，未知值按 Hadir 处理并记录警告
    pub fn from_db(value: &str) -> Self {
        Self::from_str(value).unwrap_or_else(|_| {
            tracing::warn!("Unknown attendance status in database: {}", value);
            Self::Hadir
        })
    }
}

impl<'de> Deserialize<'de> for AttendanceStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_str(raw.trim()).map_err(|_| {
            serde::de::Error::custom(format!(
                "invalid attendance status '{}', expected one of Hadir, Sakit, Izin, Alfa",
                raw
            ))
        })
    }
}

/// 学生状态
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolSettings {
    pub id: String,
    pub school_name: String,
}

/// 班级；学生通过 `name` 关联班级
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub id: String,
    pub name: String,
    pub teacher_name: String,
    pub teacher_nip: String,
    pub headmaster_name: String,
    pub headmaster_nip: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub nis: String,
    pub name: String,
    pub class_name: String,
    pub status: StudentStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: String,
    pub nip: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentAttendance {
    pub id: String,
    pub student_id: String,
    pub status: AttendanceStatus,
    pub note: Option<String>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherAttendance {
    pub id: String,
    pub teacher_id: String,
    pub status: AttendanceStatus,
    pub note: Option<String>,
    pub date: NaiveDate,
}

/// 学生列表过滤条件
#[derive(Default, Clone, Debug)]
pub struct StudentFilter {
    /// 姓名（不区分大小写）或 NIS 子串
    pub search: Option<String>,
    /// 班级名称；None 表示全部班级
    pub class_name: Option<String>,
}

/// 新生成的记录 ID
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
