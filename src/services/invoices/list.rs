use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::InvoiceService;
use crate::models::{
    ApiResponse, ErrorCode,
    invoices::requests::{InvoiceListQuery, InvoiceQueryParams},
};
use crate::services::storage_error_response;

pub async fn list_invoices(
    service: &InvoiceService,
    request: &HttpRequest,
    query: InvoiceQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = InvoiceListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        student_id: query.student_id,
        term: query.term,
        status: query.status,
    };

    match storage.list_invoices_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Invoice list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::InvoiceNotFound,
            ErrorCode::Conflict,
        )),
    }
}
