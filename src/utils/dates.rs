//! 日期工具：学校时区的"今天"、日期/月份解析、周与月的区间、印尼语日期标签

use chrono::{Datelike, Days, FixedOffset, Months, NaiveDate, Offset, Utc};

use crate::errors::{AttendanceError, Result};

const DAY_NAMES: [&str; 7] = [
    "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu",
];

const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// 周一到周六的短标签
pub const SCHOOL_WEEK_LABELS: [&str; 6] = ["Sen", "Sel", "Rab", "Kam", "Jum", "Sab"];

/// 指定 UTC 偏移（分钟）下的当前日期
pub fn today_in_offset(offset_minutes: i32) -> NaiveDate {
    let offset =
        FixedOffset::east_opt(offset_minutes.saturating_mul(60)).unwrap_or_else(|| Utc.fix());
    Utc::now().with_timezone(&offset).date_naive()
}

/// 按学校配置的时区取今天
pub fn school_today() -> NaiveDate {
    today_in_offset(crate::config::get_config().school.utc_offset_minutes)
}

/// 解析 `YYYY-MM-DD`
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        AttendanceError::date_parse(format!(
            "Invalid date '{}', expected YYYY-MM-DD",
            input
        ))
    })
}

/// 解析 `YYYY-MM`，返回该月第一天
pub fn parse_month(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(&format!("{}-01", input), "%Y-%m-%d").map_err(|_| {
        AttendanceError::date_parse(format!("Invalid month '{}', expected YYYY-MM", input))
    })
}

/// 月份的第一天和最后一天（闭区间）
pub fn month_bounds(any_day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = any_day.with_day(1).unwrap_or(any_day);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first);
    (first, last)
}

/// 所在周的周一到周六
pub fn school_week(day: NaiveDate) -> [NaiveDate; 6] {
    let monday = day
        .checked_sub_days(Days::new(u64::from(day.weekday().num_days_from_monday())))
        .unwrap_or(day);
    std::array::from_fn(|i| monday.checked_add_days(Days::new(i as u64)).unwrap_or(monday))
}

/// 印尼语日期标签，例如 `Jumat, 16 Oktober 2026`
pub fn indonesian_date_label(day: NaiveDate) -> String {
    format!(
        "{}, {} {} {}",
        DAY_NAMES[day.weekday().num_days_from_monday() as usize],
        day.day(),
        MONTH_NAMES[day.month0() as usize],
        day.year()
    )
}
