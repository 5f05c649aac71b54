use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, require_student};
use crate::models::ApiResponse;

pub async fn get_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match require_student(&storage, student_id).await {
        Ok(student) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            student,
            "Student retrieved successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}
