use std::collections::HashSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AttendanceService;
use crate::models::attendance::requests::{AttendanceMark, MarkAttendanceRequest};
use crate::models::attendance::responses::MarkAttendanceResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::services::students::check_class_exists;

fn invalid(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::AttendanceInvalid,
        message,
    ))
}

/// 同一批次内学生不能重复
fn find_duplicate(records: &[AttendanceMark]) -> Option<i64> {
    let mut seen = HashSet::new();
    records
        .iter()
        .find(|r| !seen.insert(r.student_id))
        .map(|r| r.student_id)
}

pub async fn mark_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    body: MarkAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if body.records.is_empty() {
        return Ok(invalid("At least one attendance record is required"));
    }
    if let Some(student_id) = find_duplicate(&body.records) {
        return Ok(invalid(format!(
            "Student {student_id} appears more than once in this batch"
        )));
    }
    if let Err(resp) = check_class_exists(&storage, Some(body.class_id)).await {
        return Ok(resp);
    }

    let (class_id, date) = (body.class_id, body.date);
    match storage.mark_attendance(body).await {
        Ok(recorded) => {
            info!(
                "Attendance for class {} on {} recorded ({} students)",
                class_id, date, recorded
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                MarkAttendanceResponse {
                    class_id,
                    date,
                    recorded,
                },
                "Attendance recorded successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::StudentNotFound,
            ErrorCode::Conflict,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::entities::AttendanceStatus;

    fn mark(student_id: i64) -> AttendanceMark {
        AttendanceMark {
            student_id,
            status: AttendanceStatus::Present,
            remark: None,
        }
    }

    #[test]
    fn test_find_duplicate_student() {
        assert_eq!(find_duplicate(&[mark(1), mark(2), mark(3)]), None);
        assert_eq!(find_duplicate(&[mark(1), mark(2), mark(1)]), Some(1));
    }
}
