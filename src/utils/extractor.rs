//! 路径参数提取器
//!
//! 将路径中的 ID 解析为正整数，失败时直接返回统一格式的 400 响应。

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn parse_path_id(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    let raw = req.match_info().get(name).unwrap_or_default();
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                format!("Invalid path parameter '{name}': {raw}"),
            ));
            Err(InternalError::from_response(format!("invalid {name}"), response).into())
        }
    }
}

macro_rules! safe_path_id {
    ($($name:ident => $param:literal),+ $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name(pub i64);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(parse_path_id(req, $param).map($name))
                }
            }
        )+
    };
}

safe_path_id! {
    SafeIDI64 => "id",
    SafeClassIdI64 => "class_id",
    SafeStudentIdI64 => "student_id",
    SafeGuardianIdI64 => "guardian_id",
    SafeTemplateIdI64 => "template_id",
    SafeEntryIdI64 => "entry_id",
    SafeInvoiceIdI64 => "invoice_id",
    SafePaymentIdI64 => "payment_id",
    SafeExamIdI64 => "exam_id",
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_extracts_positive_id() {
        let req = TestRequest::default()
            .param("student_id", "42")
            .to_http_request();
        let id = SafeStudentIdI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 42);
    }

    #[actix_web::test]
    async fn test_rejects_non_numeric_and_zero() {
        let req = TestRequest::default()
            .param("invoice_id", "abc")
            .to_http_request();
        assert!(SafeInvoiceIdI64::extract(&req).await.is_err());

        let req = TestRequest::default()
            .param("invoice_id", "0")
            .to_http_request();
        assert!(SafeInvoiceIdI64::extract(&req).await.is_err());
    }
}
