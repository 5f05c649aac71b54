use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ClassService, check_class_teacher};
use crate::models::classes::requests::CreateClassRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{storage_error_response, validation_error};
use crate::utils::validate::non_empty;

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    mut class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(name) = non_empty(&class_data.name).map(str::to_string) else {
        return Ok(validation_error("Class name is required"));
    };
    class_data.name = name;

    if let Err(resp) = check_class_teacher(&storage, class_data.class_teacher_id).await {
        return Ok(resp);
    }

    match storage.create_class(class_data).await {
        Ok(class) => {
            info!("Class {} created with id {}", class.name, class.id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(class, "Class created successfully")))
        }
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::ClassNotFound,
            ErrorCode::ClassAlreadyExists,
        )),
    }
}
