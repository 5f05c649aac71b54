//! 考勤存储操作

use super::SeaOrmStorage;
use crate::entity::attendance::{ActiveModel, Column, Entity as Attendance};
use crate::entity::format_date;
use crate::errors::{Result, SchoolError};
use crate::models::attendance::{entities::AttendanceRecord, requests::MarkAttendanceRequest};
use chrono::NaiveDate;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};

impl SeaOrmStorage {
    /// 批量登记考勤，同一学生同一天重复登记时覆盖
    pub async fn mark_attendance_impl(&self, req: MarkAttendanceRequest) -> Result<usize> {
        let now = chrono::Utc::now().timestamp();
        let date = format_date(req.date);
        let count = req.records.len();

        let txn = self.db.begin().await?;
        for record in req.records {
            let model = ActiveModel {
                student_id: Set(record.student_id),
                class_id: Set(req.class_id),
                date: Set(date.clone()),
                status: Set(record.status.to_string()),
                remark: Set(record.remark),
                recorded_at: Set(now),
                ..Default::default()
            };

            Attendance::insert(model)
                .on_conflict(
                    OnConflict::columns([Column::StudentId, Column::Date])
                        .update_columns([
                            Column::ClassId,
                            Column::Status,
                            Column::Remark,
                            Column::RecordedAt,
                        ])
                        .to_owned(),
                )
                .exec(&txn)
                .await?;
        }
        txn.commit().await?;

        Ok(count)
    }

    pub async fn list_class_attendance_impl(
        &self,
        class_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        let records = Attendance::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Date.eq(format_date(date)))
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级考勤失败: {e}")))?;

        Ok(records.into_iter().map(|m| m.into_record()).collect())
    }

    /// 学生考勤记录，日期区间两端均包含
    pub async fn list_student_attendance_impl(
        &self,
        student_id: i64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>> {
        let mut select = Attendance::find().filter(Column::StudentId.eq(student_id));

        // YYYY-MM-DD 字符串按字典序比较即按日期比较
        if let Some(from) = from {
            select = select.filter(Column::Date.gte(format_date(from)));
        }
        if let Some(to) = to {
            select = select.filter(Column::Date.lte(format_date(to)));
        }

        let records = select
            .order_by_asc(Column::Date)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生考勤失败: {e}")))?;

        Ok(records.into_iter().map(|m| m.into_record()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::entities::AttendanceStatus;
    use crate::models::attendance::requests::AttendanceMark;
    use crate::models::attendance::responses::AttendanceSummary;
    use crate::models::classes::requests::CreateClassRequest;
    use crate::models::students::requests::CreateStudentRequest;

    #[tokio::test]
    async fn test_mark_twice_overwrites_and_summarises() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let class_id = storage
            .create_class_impl(CreateClassRequest {
                name: "Grade 2".to_string(),
                grade_level: Some(2),
                class_teacher_id: None,
            })
            .await
            .unwrap()
            .id;
        let student_id = storage
            .create_student_impl(CreateStudentRequest {
                admission_no: "ADM-77".to_string(),
                first_name: "Baraka".to_string(),
                last_name: "Ochieng".to_string(),
                gender: None,
                date_of_birth: None,
                class_id: Some(class_id),
                status: None,
            })
            .await
            .unwrap()
            .id;

        let day = |d| NaiveDate::from_ymd_opt(2025, 3, d).unwrap();
        let mark = |date, status| MarkAttendanceRequest {
            class_id,
            date,
            records: vec![AttendanceMark {
                student_id,
                status,
                remark: None,
            }],
        };

        storage
            .mark_attendance_impl(mark(day(3), AttendanceStatus::Absent))
            .await
            .unwrap();
        storage
            .mark_attendance_impl(mark(day(3), AttendanceStatus::Late))
            .await
            .unwrap();
        storage
            .mark_attendance_impl(mark(day(4), AttendanceStatus::Present))
            .await
            .unwrap();
        storage
            .mark_attendance_impl(mark(day(10), AttendanceStatus::Absent))
            .await
            .unwrap();

        let on_day = storage
            .list_class_attendance_impl(class_id, day(3))
            .await
            .unwrap();
        assert_eq!(on_day.len(), 1);
        assert_eq!(on_day[0].status, AttendanceStatus::Late);

        let first_week = storage
            .list_student_attendance_impl(student_id, Some(day(1)), Some(day(7)))
            .await
            .unwrap();
        let summary = AttendanceSummary::from_records(student_id, &first_week);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.attendance_rate, 1.0);

        let all = storage
            .list_student_attendance_impl(student_id, None, None)
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
    }
}
