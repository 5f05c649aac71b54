use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, require_student};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

pub async fn list_student_guardians(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = require_student(&storage, student_id).await {
        return Ok(resp);
    }

    match storage.list_student_guardians(student_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            items,
            "Student guardians retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::GuardianNotFound,
            ErrorCode::Conflict,
        )),
    }
}
