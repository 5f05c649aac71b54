use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GuardianService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error_response};

pub async fn get_guardian(
    service: &GuardianService,
    request: &HttpRequest,
    guardian_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_guardian_by_id(guardian_id).await {
        Ok(Some(guardian)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            guardian,
            "Guardian retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::GuardianNotFound, "Guardian not found")),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::GuardianNotFound,
            ErrorCode::Conflict,
        )),
    }
}
