//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。
//! 时间戳以 Unix 秒存储，日期以 `YYYY-MM-DD` 字符串存储。

pub mod prelude;

pub mod attendance;
pub mod classes;
pub mod exam_results;
pub mod exams;
pub mod guardians;
pub mod invoices;
pub mod payments;
pub mod staff;
pub mod student_guardians;
pub mod students;
pub mod subjects;
pub mod timetable_entries;
pub mod timetable_templates;

use chrono::{DateTime, NaiveDate, Utc};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn timestamp_to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

pub(crate) fn parse_stored_date(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok())
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_round_trip_and_garbage() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(format_date(date), "2024-12-31");
        assert_eq!(parse_stored_date(Some("2024-12-31")), Some(date));
        assert_eq!(parse_stored_date(Some("31/12/2024")), None);
        assert_eq!(parse_stored_date(None), None);
    }
}
