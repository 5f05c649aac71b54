use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ExamService;
use crate::models::exams::requests::{CreateExamRequest, ExamQueryParams};
use crate::models::exams::responses::ExamListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::students::check_class_exists;
use crate::services::{not_found, storage_error_response, validation_error};
use crate::utils::validate::non_empty;

pub async fn create_exam(
    service: &ExamService,
    request: &HttpRequest,
    mut exam_data: CreateExamRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if !exam_data.max_score.is_finite() || exam_data.max_score <= 0.0 {
        return Ok(validation_error("max_score must be greater than zero"));
    }
    let (Some(name), Some(term)) = (
        non_empty(&exam_data.name).map(str::to_string),
        non_empty(&exam_data.term).map(str::to_string),
    ) else {
        return Ok(validation_error("Exam name and term are required"));
    };
    exam_data.name = name;
    exam_data.term = term;

    if let Err(resp) = check_class_exists(&storage, Some(exam_data.class_id)).await {
        return Ok(resp);
    }
    match storage.get_subject_by_id(exam_data.subject_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(e) => {
            return Ok(storage_error_response(
                &e,
                ErrorCode::SubjectNotFound,
                ErrorCode::Conflict,
            ));
        }
    }

    match storage.create_exam(exam_data).await {
        Ok(exam) => {
            info!("Exam {} ({}) created for class {}", exam.name, exam.id, exam.class_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(exam, "Exam created successfully")))
        }
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::ExamNotFound,
            ErrorCode::Conflict,
        )),
    }
}

pub async fn list_exams(
    service: &ExamService,
    request: &HttpRequest,
    query: ExamQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_exams(query).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ExamListResponse { items },
            "Exam list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::ExamNotFound,
            ErrorCode::Conflict,
        )),
    }
}

pub async fn delete_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_exam(exam_id).await {
        Ok(true) => {
            info!("Exam {} deleted", exam_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Exam deleted successfully")))
        }
        Ok(false) => Ok(not_found(ErrorCode::ExamNotFound, "Exam not found")),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::ExamNotFound,
            ErrorCode::Conflict,
        )),
    }
}
