use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::InvoiceService;
use crate::models::invoices::responses::InvoiceDetailResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error_response};

pub async fn get_invoice(
    service: &InvoiceService,
    request: &HttpRequest,
    invoice_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let invoice = match storage.get_invoice_by_id(invoice_id).await {
        Ok(Some(invoice)) => invoice,
        Ok(None) => return Ok(not_found(ErrorCode::InvoiceNotFound, "Invoice not found")),
        Err(e) => {
            return Ok(storage_error_response(
                &e,
                ErrorCode::InvoiceNotFound,
                ErrorCode::Conflict,
            ));
        }
    };

    match storage.list_payments(invoice_id).await {
        Ok(payments) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            InvoiceDetailResponse {
                amount_paid: invoice.amount_paid(),
                invoice,
                payments,
            },
            "Invoice retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::PaymentNotFound,
            ErrorCode::Conflict,
        )),
    }
}
