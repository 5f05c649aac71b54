use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StaffService, validate_contact};
use crate::models::staff::requests::CreateStaffRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{storage_error_response, validation_error};
use crate::utils::validate::{non_empty, validate_identifier};

pub async fn create_staff(
    service: &StaffService,
    request: &HttpRequest,
    mut staff_data: CreateStaffRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    staff_data.staff_no = staff_data.staff_no.trim().to_string();
    if let Err(msg) = validate_identifier(&staff_data.staff_no) {
        return Ok(validation_error(format!("Invalid staff_no: {msg}")));
    }
    let Some(full_name) = non_empty(&staff_data.full_name).map(str::to_string) else {
        return Ok(validation_error("Full name is required"));
    };
    staff_data.full_name = full_name;
    if let Err(msg) = validate_contact(staff_data.email.as_deref(), staff_data.phone.as_deref()) {
        return Ok(validation_error(msg));
    }

    match storage.create_staff(staff_data).await {
        Ok(staff) => {
            info!("Staff {} ({}) created", staff.staff_no, staff.id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(staff, "Staff member created successfully")))
        }
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::StaffNotFound,
            ErrorCode::StaffAlreadyExists,
        )),
    }
}
