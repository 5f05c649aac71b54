use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StaffService, validate_contact};
use crate::models::staff::requests::UpdateStaffRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error_response, validation_error};

pub async fn update_staff(
    service: &StaffService,
    request: &HttpRequest,
    staff_id: i64,
    update_data: UpdateStaffRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if update_data
        .full_name
        .as_deref()
        .is_some_and(|name| name.trim().is_empty())
    {
        return Ok(validation_error("Full name cannot be empty"));
    }
    if let Err(msg) = validate_contact(update_data.email.as_deref(), update_data.phone.as_deref())
    {
        return Ok(validation_error(msg));
    }

    match storage.update_staff(staff_id, update_data).await {
        Ok(Some(staff)) => {
            info!("Staff {} updated", staff.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                staff,
                "Staff member updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::StaffNotFound, "Staff member not found")),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::StaffNotFound,
            ErrorCode::StaffAlreadyExists,
        )),
    }
}
