use chrono::NaiveDate;
use serde::Deserialize;

use super::entities::AttendanceStatus;

// 单个学生的考勤
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceMark {
    pub student_id: i64,
    pub status: AttendanceStatus,
    pub remark: Option<String>,
}

// 批量登记考勤
#[derive(Debug, Deserialize)]
pub struct MarkAttendanceRequest {
    pub class_id: i64,
    pub date: NaiveDate,
    pub records: Vec<AttendanceMark>,
}

// 按班级和日期查询
#[derive(Debug, Deserialize)]
pub struct ClassAttendanceQuery {
    pub date: NaiveDate,
}

// 学生考勤统计区间
#[derive(Debug, Default, Deserialize)]
pub struct StudentAttendanceQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
