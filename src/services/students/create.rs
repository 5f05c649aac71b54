use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StudentService, check_class_exists};
use crate::models::students::requests::CreateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{storage_error_response, validation_error};
use crate::utils::validate::{non_empty, validate_identifier};

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    mut student_data: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    student_data.admission_no = student_data.admission_no.trim().to_string();
    if let Err(msg) = validate_identifier(&student_data.admission_no) {
        return Ok(validation_error(format!("Invalid admission_no: {msg}")));
    }
    let (Some(first_name), Some(last_name)) = (
        non_empty(&student_data.first_name).map(str::to_string),
        non_empty(&student_data.last_name).map(str::to_string),
    ) else {
        return Ok(validation_error("First name and last name are required"));
    };
    student_data.first_name = first_name;
    student_data.last_name = last_name;

    if let Err(resp) = check_class_exists(&storage, student_data.class_id).await {
        return Ok(resp);
    }

    match storage.create_student(student_data).await {
        Ok(student) => {
            info!("Student {} enrolled with id {}", student.admission_no, student.id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(student, "Student created successfully")))
        }
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::StudentNotFound,
            ErrorCode::StudentAlreadyExists,
        )),
    }
}
