use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

crate::string_enum! {
    // 考勤状态
    pub enum AttendanceStatus {
        Present => "present",
        Absent => "absent",
        Late => "late",
        Excused => "excused",
    }
}

// 考勤记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub remark: Option<String>,
    pub recorded_at: chrono::DateTime<chrono::Utc>,
}
