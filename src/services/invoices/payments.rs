use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{InvoiceService, ledger_error_response};
use crate::errors::SchoolError;
use crate::models::invoices::requests::RecordPaymentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::not_found;

pub async fn record_payment(
    service: &InvoiceService,
    request: &HttpRequest,
    invoice_id: i64,
    mut payment: RecordPaymentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if payment.amount <= 0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::PaymentInvalidAmount,
            "Payment amount must be greater than zero",
        )));
    }
    payment.reference = payment
        .reference
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());

    match storage.record_payment(invoice_id, payment).await {
        Ok(receipt) => {
            if receipt.invoice.balance < 0 {
                info!(
                    "Invoice {} overpaid, credit of {}",
                    receipt.invoice.invoice_no, -receipt.invoice.balance
                );
            }
            Ok(HttpResponse::Created().json(ApiResponse::success(
                receipt,
                "Payment recorded successfully",
            )))
        }
        Err(SchoolError::NotFound(_)) => {
            Ok(not_found(ErrorCode::InvoiceNotFound, "Invoice not found"))
        }
        Err(e) => {
            if matches!(e, SchoolError::ConcurrentUpdate(_)) {
                warn!("Payment on invoice {} lost a balance race", invoice_id);
            }
            Ok(ledger_error_response(&e))
        }
    }
}

pub async fn void_payment(
    service: &InvoiceService,
    request: &HttpRequest,
    payment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.void_payment(payment_id).await {
        Ok(invoice) => {
            info!(
                "Payment {} voided, invoice {} balance now {}",
                payment_id, invoice.invoice_no, invoice.balance
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                invoice,
                "Payment voided successfully",
            )))
        }
        Err(SchoolError::NotFound(_)) => {
            Ok(not_found(ErrorCode::PaymentNotFound, "Payment not found"))
        }
        Err(e) => Ok(ledger_error_response(&e)),
    }
}
