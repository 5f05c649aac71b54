use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GuardianService;
use crate::models::guardians::requests::CreateGuardianRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::staff::validate_contact;
use crate::services::{storage_error_response, validation_error};
use crate::utils::validate::non_empty;

pub async fn create_guardian(
    service: &GuardianService,
    request: &HttpRequest,
    mut guardian_data: CreateGuardianRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(full_name) = non_empty(&guardian_data.full_name).map(str::to_string) else {
        return Ok(validation_error("Full name is required"));
    };
    guardian_data.full_name = full_name;
    guardian_data.phone = guardian_data.phone.trim().to_string();
    if guardian_data.phone.is_empty() {
        return Ok(validation_error("Phone number is required"));
    }
    if let Err(msg) = validate_contact(
        guardian_data.email.as_deref(),
        Some(guardian_data.phone.as_str()),
    ) {
        return Ok(validation_error(msg));
    }

    match storage.create_guardian(guardian_data).await {
        Ok(guardian) => {
            info!("Guardian {} created", guardian.id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(guardian, "Guardian created successfully")))
        }
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::GuardianNotFound,
            ErrorCode::GuardianAlreadyExists,
        )),
    }
}
