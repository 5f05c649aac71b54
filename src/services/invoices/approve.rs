use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::InvoiceService;
use crate::errors::SchoolError;
use crate::models::invoices::entities::InvoiceStatus;
use crate::models::invoices::requests::ApproveInvoiceRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error_response};

fn conflict(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(code, message))
}

pub async fn approve_invoice(
    service: &InvoiceService,
    request: &HttpRequest,
    invoice_id: i64,
    body: ApproveInvoiceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_staff_by_id(body.approved_by).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::StaffNotFound, "Approver not found")),
        Err(e) => {
            return Ok(storage_error_response(
                &e,
                ErrorCode::StaffNotFound,
                ErrorCode::Conflict,
            ));
        }
    }

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
    if invoice.status == InvoiceStatus::Cancelled {
        return Ok(conflict(
            ErrorCode::InvoiceCancelled,
            "Cancelled invoices cannot be approved",
        ));
    }
    if invoice.approved_at.is_some() {
        return Ok(conflict(
            ErrorCode::InvoiceAlreadyApproved,
            "Invoice has already been approved",
        ));
    }

    match storage.approve_invoice(invoice_id, body.approved_by).await {
        Ok(invoice) => {
            info!(
                "Invoice {} approved by staff {}",
                invoice.invoice_no, body.approved_by
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                invoice,
                "Invoice approved successfully",
            )))
        }
        // 并发审批时由存储层的条件更新兜底
        Err(SchoolError::Conflict(msg)) => Ok(conflict(ErrorCode::InvoiceAlreadyApproved, &msg)),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::InvoiceNotFound,
            ErrorCode::Conflict,
        )),
    }
}

pub async fn cancel_invoice(
    service: &InvoiceService,
    request: &HttpRequest,
    invoice_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.cancel_invoice(invoice_id).await {
        Ok(invoice) => {
            info!("Invoice {} cancelled", invoice.invoice_no);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                invoice,
                "Invoice cancelled successfully",
            )))
        }
        Err(SchoolError::Conflict(msg)) => Ok(conflict(ErrorCode::InvoiceCancelled, &msg)),
        Err(SchoolError::Validation(msg)) => Ok(conflict(ErrorCode::InvoiceHasPayments, &msg)),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::InvoiceNotFound,
            ErrorCode::Conflict,
        )),
    }
}
