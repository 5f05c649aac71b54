use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AttendanceService;
use crate::models::attendance::requests::{ClassAttendanceQuery, StudentAttendanceQuery};
use crate::models::attendance::responses::{AttendanceListResponse, AttendanceSummary};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::services::students::{check_class_exists, require_student};

pub async fn list_class_attendance(
    service: &AttendanceService,
    request: &HttpRequest,
    class_id: i64,
    query: ClassAttendanceQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = check_class_exists(&storage, Some(class_id)).await {
        return Ok(resp);
    }

    match storage.list_class_attendance(class_id, query.date).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AttendanceListResponse { items },
            "Class attendance retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::ClassNotFound,
            ErrorCode::Conflict,
        )),
    }
}

pub async fn student_summary(
    service: &AttendanceService,
    request: &HttpRequest,
    student_id: i64,
    query: StudentAttendanceQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let (Some(from), Some(to)) = (query.from, query.to)
        && from > to
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AttendanceInvalid,
            "'from' must not be after 'to'",
        )));
    }
    if let Err(resp) = require_student(&storage, student_id).await {
        return Ok(resp);
    }

    match storage
        .list_student_attendance(student_id, query.from, query.to)
        .await
    {
        Ok(records) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AttendanceSummary::from_records(student_id, &records),
            "Attendance summary retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::StudentNotFound,
            ErrorCode::Conflict,
        )),
    }
}
