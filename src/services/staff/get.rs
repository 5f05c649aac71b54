use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StaffService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error_response};

pub async fn get_staff(
    service: &StaffService,
    request: &HttpRequest,
    staff_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_staff_by_id(staff_id).await {
        Ok(Some(staff)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            staff,
            "Staff member retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::StaffNotFound, "Staff member not found")),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::StaffNotFound,
            ErrorCode::Conflict,
        )),
    }
}
