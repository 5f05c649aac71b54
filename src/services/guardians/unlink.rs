use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GuardianService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error_response};

pub async fn unlink_guardian(
    service: &GuardianService,
    request: &HttpRequest,
    student_id: i64,
    guardian_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.unlink_guardian(student_id, guardian_id).await {
        Ok(true) => {
            info!("Guardian {} unlinked from student {}", guardian_id, student_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Guardian unlinked successfully",
            )))
        }
        Ok(false) => Ok(not_found(
            ErrorCode::GuardianLinkNotFound,
            "Guardian is not linked to this student",
        )),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::GuardianLinkNotFound,
            ErrorCode::Conflict,
        )),
    }
}
