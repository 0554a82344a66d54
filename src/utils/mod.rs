pub mod dates;

pub use dates::{
    SCHOOL_WEEK_LABELS, indonesian_date_label, month_bounds, parse_date,
    parse_month, school_today, school_week, today_in_offset,
};

/// 去掉首尾空白，空串视为 None
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// 班级选择值：`Semua` 或空串表示全部班级
pub fn class_selection(value: Option<&str>) -> Option<String> {
    non_blank(value).filter(|v| !v.eq_ignore_ascii_case(ALL_CLASSES))
}

/// "全部班级"的选择值
pub const ALL_CLASSES: &str = "Semua";
