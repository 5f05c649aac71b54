pub mod approve;
pub mod create;
pub mod get;
pub mod list;
pub mod payments;
pub mod statement;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::SchoolError;
use crate::models::invoices::requests::{
    ApproveInvoiceRequest, CreateInvoiceRequest, InvoiceQueryParams, RecordPaymentRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;
use crate::storage::Storage;

pub struct InvoiceService {
    storage: Option<Arc<dyn Storage>>,
}

impl InvoiceService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn create_invoice(
        &self,
        request: &HttpRequest,
        invoice_data: CreateInvoiceRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_invoice(self, request, invoice_data).await
    }

    // 账单详情（含缴费记录）
    pub async fn get_invoice(
        &self,
        request: &HttpRequest,
        invoice_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_invoice(self, request, invoice_id).await
    }

    pub async fn list_invoices(
        &self,
        request: &HttpRequest,
        query: InvoiceQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_invoices(self, request, query).await
    }

    pub async fn approve_invoice(
        &self,
        request: &HttpRequest,
        invoice_id: i64,
        body: ApproveInvoiceRequest,
    ) -> ActixResult<HttpResponse> {
        approve::approve_invoice(self, request, invoice_id, body).await
    }

    pub async fn cancel_invoice(
        &self,
        request: &HttpRequest,
        invoice_id: i64,
    ) -> ActixResult<HttpResponse> {
        approve::cancel_invoice(self, request, invoice_id).await
    }

    // 登记缴费
    pub async fn record_payment(
        &self,
        request: &HttpRequest,
        invoice_id: i64,
        payment: RecordPaymentRequest,
    ) -> ActixResult<HttpResponse> {
        payments::record_payment(self, request, invoice_id, payment).await
    }

    // 作废缴费
    pub async fn void_payment(
        &self,
        request: &HttpRequest,
        payment_id: i64,
    ) -> ActixResult<HttpResponse> {
        payments::void_payment(self, request, payment_id).await
    }

    // 学生账单汇总
    pub async fn student_statement(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        statement::student_statement(self, request, student_id).await
    }
}

/// 账本写操作的错误映射
pub(crate) fn ledger_error_response(err: &SchoolError) -> HttpResponse {
    match err {
        SchoolError::Conflict(msg) => HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::InvoiceCancelled,
            msg.as_str(),
        )),
        SchoolError::Validation(msg) => HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::PaymentInvalidAmount,
            msg.as_str(),
        )),
        other => storage_error_response(other, ErrorCode::InvoiceNotFound, ErrorCode::Conflict),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_ledger_error_mapping() {
        let resp = ledger_error_response(&SchoolError::conflict("cancelled"));
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = ledger_error_response(&SchoolError::validation("amount"));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = ledger_error_response(&SchoolError::concurrent_update("stale"));
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = ledger_error_response(&SchoolError::not_found("gone"));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
