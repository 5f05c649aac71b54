use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ClassService, check_class_teacher};
use crate::models::classes::requests::UpdateClassRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error_response, validation_error};

pub async fn update_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
    update_data: UpdateClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if update_data
        .name
        .as_deref()
        .is_some_and(|name| name.trim().is_empty())
    {
        return Ok(validation_error("Class name cannot be empty"));
    }

    if let Err(resp) = check_class_teacher(&storage, update_data.class_teacher_id).await {
        return Ok(resp);
    }

    match storage.update_class(class_id, update_data).await {
        Ok(Some(class)) => {
            info!("Class {} updated", class.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Class updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::ClassNotFound, "Class not found")),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::ClassNotFound,
            ErrorCode::ClassAlreadyExists,
        )),
    }
}
