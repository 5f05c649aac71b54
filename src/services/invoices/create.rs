use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::InvoiceService;
use crate::models::invoices::requests::CreateInvoiceRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::students::require_student;
use crate::services::{storage_error_response, validation_error};
use crate::utils::validate::{non_empty, validate_identifier};

pub async fn create_invoice(
    service: &InvoiceService,
    request: &HttpRequest,
    mut invoice_data: CreateInvoiceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if invoice_data.amount <= 0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::PaymentInvalidAmount,
            "Invoice amount must be greater than zero",
        )));
    }
    let Some(term) = non_empty(&invoice_data.term).map(str::to_string) else {
        return Ok(validation_error("Term is required"));
    };
    invoice_data.term = term;

    // 空白编号视为未提供
    invoice_data.invoice_no = invoice_data
        .invoice_no
        .as_deref()
        .and_then(non_empty)
        .map(str::to_string);
    if let Some(invoice_no) = invoice_data.invoice_no.as_deref()
        && let Err(msg) = validate_identifier(invoice_no)
    {
        return Ok(validation_error(format!("Invalid invoice_no: {msg}")));
    }

    if let Err(resp) = require_student(&storage, invoice_data.student_id).await {
        return Ok(resp);
    }

    match storage.create_invoice(invoice_data).await {
        Ok(invoice) => {
            info!(
                "Invoice {} issued to student {} for {}",
                invoice.invoice_no, invoice.student_id, invoice.amount
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(invoice, "Invoice created successfully")))
        }
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::InvoiceNotFound,
            ErrorCode::InvoiceAlreadyExists,
        )),
    }
}
