use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::InvoiceService;
use crate::models::invoices::responses::StudentStatement;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::services::students::require_student;

pub async fn student_statement(
    service: &InvoiceService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = require_student(&storage, student_id).await {
        return Ok(resp);
    }

    match storage.list_student_invoices(student_id).await {
        Ok(invoices) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentStatement::from_invoices(student_id, &invoices),
            "Student statement retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::InvoiceNotFound,
            ErrorCode::Conflict,
        )),
    }
}
