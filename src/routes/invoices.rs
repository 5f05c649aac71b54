use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::invoices::requests::{
    ApproveInvoiceRequest, CreateInvoiceRequest, InvoiceQueryParams, RecordPaymentRequest,
};
use crate::services::InvoiceService;
use crate::utils::{SafeInvoiceIdI64, SafePaymentIdI64};

static INVOICE_SERVICE: Lazy<InvoiceService> = Lazy::new(InvoiceService::new_lazy);

pub async fn list_invoices(
    req: HttpRequest,
    query: web::Query<InvoiceQueryParams>,
) -> ActixResult<HttpResponse> {
    INVOICE_SERVICE.list_invoices(&req, query.into_inner()).await
}

pub async fn create_invoice(
    req: HttpRequest,
    invoice_data: web::Json<CreateInvoiceRequest>,
) -> ActixResult<HttpResponse> {
    INVOICE_SERVICE
        .create_invoice(&req, invoice_data.into_inner())
        .await
}

pub async fn get_invoice(
    req: HttpRequest,
    invoice_id: SafeInvoiceIdI64,
) -> ActixResult<HttpResponse> {
    INVOICE_SERVICE.get_invoice(&req, invoice_id.0).await
}

pub async fn approve_invoice(
    req: HttpRequest,
    invoice_id: SafeInvoiceIdI64,
    body: web::Json<ApproveInvoiceRequest>,
) -> ActixResult<HttpResponse> {
    INVOICE_SERVICE
        .approve_invoice(&req, invoice_id.0, body.into_inner())
        .await
}

pub async fn cancel_invoice(
    req: HttpRequest,
    invoice_id: SafeInvoiceIdI64,
) -> ActixResult<HttpResponse> {
    INVOICE_SERVICE.cancel_invoice(&req, invoice_id.0).await
}

pub async fn record_payment(
    req: HttpRequest,
    invoice_id: SafeInvoiceIdI64,
    payment: web::Json<RecordPaymentRequest>,
) -> ActixResult<HttpResponse> {
    INVOICE_SERVICE
        .record_payment(&req, invoice_id.0, payment.into_inner())
        .await
}

pub async fn void_payment(
    req: HttpRequest,
    payment_id: SafePaymentIdI64,
) -> ActixResult<HttpResponse> {
    INVOICE_SERVICE.void_payment(&req, payment_id.0).await
}

pub fn configure_invoices_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/invoices")
            .service(
                web::resource("")
                    .route(web::get().to(list_invoices))
                    .route(web::post().to(create_invoice)),
            )
            .route("/payments/{payment_id}", web::delete().to(void_payment))
            .route("/{invoice_id}", web::get().to(get_invoice))
            .route("/{invoice_id}/approve", web::post().to(approve_invoice))
            .route("/{invoice_id}/cancel", web::post().to(cancel_invoice))
            .route("/{invoice_id}/payments", web::post().to(record_payment)),
    );
}
