use serde::Serialize;

use super::entities::{AttendanceRecord, AttendanceStatus};

// 批量登记结果
#[derive(Debug, Serialize)]
pub struct MarkAttendanceResponse {
    pub class_id: i64,
    pub date: chrono::NaiveDate,
    pub recorded: usize,
}

// 考勤列表
#[derive(Debug, Serialize)]
pub struct AttendanceListResponse {
    pub items: Vec<AttendanceRecord>,
}

// 学生考勤统计
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct AttendanceSummary {
    pub student_id: i64,
    pub total: i64,
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    pub excused: i64,
    // 出勤率 = (出勤 + 迟到) / 总数，无记录时为 0
    pub attendance_rate: f64,
}

impl AttendanceSummary {
    pub fn from_records(student_id: i64, records: &[AttendanceRecord]) -> Self {
        let mut summary = Self {
            student_id,
            ..Default::default()
        };

        for record in records {
            summary.total += 1;
            match record.status {
                AttendanceStatus::Present => summary.present += 1,
                AttendanceStatus::Absent => summary.absent += 1,
                AttendanceStatus::Late => summary.late += 1,
                AttendanceStatus::Excused => summary.excused += 1,
            }
        }

        if summary.total > 0 {
            summary.attendance_rate =
                (summary.present + summary.late) as f64 / summary.total as f64;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: 0,
            student_id: 1,
            class_id: 1,
            date: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            status,
            remark: None,
            recorded_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_summary_counts_late_as_attended() {
        let records = vec![
            record(AttendanceStatus::Present),
            record(AttendanceStatus::Late),
            record(AttendanceStatus::Absent),
            record(AttendanceStatus::Excused),
        ];
        let summary = AttendanceSummary::from_records(1, &records);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.present, 1);
        assert_eq!(summary.late, 1);
        assert!((summary.attendance_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_summary() {
        let summary = AttendanceSummary::from_records(9, &[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.attendance_rate, 0.0);
    }
}
