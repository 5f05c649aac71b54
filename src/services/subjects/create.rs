use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{storage_error_response, validation_error};
use crate::utils::validate::{non_empty, validate_identifier};

pub async fn create_subject(
    service: &SubjectService,
    request: &HttpRequest,
    mut subject_data: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 科目代码统一大写
    subject_data.code = subject_data.code.trim().to_ascii_uppercase();
    if let Err(msg) = validate_identifier(&subject_data.code) {
        return Ok(validation_error(format!("Invalid subject code: {msg}")));
    }
    let Some(name) = non_empty(&subject_data.name).map(str::to_string) else {
        return Ok(validation_error("Subject name is required"));
    };
    subject_data.name = name;

    match storage.create_subject(subject_data).await {
        Ok(subject) => {
            info!("Subject {} created", subject.code);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(subject, "Subject created successfully")))
        }
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::SubjectNotFound,
            ErrorCode::SubjectAlreadyExists,
        )),
    }
}
