pub mod attendance;
pub mod classes;
pub mod exams;
pub mod guardians;
pub mod imports;
pub mod invoices;
pub mod staff;
pub mod students;
pub mod subjects;
pub mod system;
pub mod timetables;

pub use attendance::AttendanceService;
pub use classes::ClassService;
pub use exams::ExamService;
pub use guardians::GuardianService;
pub use imports::ImportService;
pub use invoices::InvoiceService;
pub use staff::StaffService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use system::SystemService;
pub use timetables::TimetableService;

use actix_web::HttpResponse;
use tracing::error;

use crate::errors::SchoolError;
use crate::models::{ApiResponse, ErrorCode};

/// 存储层错误到 HTTP 响应的映射
///
/// `not_found` / `conflict` 为该资源对应的业务错误码。
pub(crate) fn storage_error_response(
    err: &SchoolError,
    not_found: ErrorCode,
    conflict: ErrorCode,
) -> HttpResponse {
    match err {
        SchoolError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(not_found, msg.as_str()))
        }
        SchoolError::Conflict(msg) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(conflict, msg.as_str()))
        }
        SchoolError::ConcurrentUpdate(msg) => HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::LedgerConcurrentUpdate, msg.as_str()),
        ),
        SchoolError::Validation(msg) | SchoolError::DateParse(msg) => HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(
                ErrorCode::ValidationFailed,
                msg.as_str(),
            )),
        SchoolError::ImportFormat(msg) => HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::ImportFileParseFailed, msg.as_str()),
        ),
        other => {
            error!("{}", other);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                other.message(),
            ))
        }
    }
}

pub(crate) fn validation_error(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::ValidationFailed,
        message,
    ))
}

pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (SchoolError::not_found("x"), StatusCode::NOT_FOUND),
            (SchoolError::conflict("x"), StatusCode::CONFLICT),
            (SchoolError::concurrent_update("x"), StatusCode::CONFLICT),
            (SchoolError::validation("x"), StatusCode::BAD_REQUEST),
            (SchoolError::date_parse("x"), StatusCode::BAD_REQUEST),
            (
                SchoolError::database_operation("x"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            let resp =
                storage_error_response(&err, ErrorCode::StudentNotFound, ErrorCode::Conflict);
            assert_eq!(resp.status(), status, "{err}");
        }
    }
}
