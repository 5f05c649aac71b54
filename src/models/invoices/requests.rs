use chrono::NaiveDate;
use serde::Deserialize;

use super::entities::{InvoiceStatus, PaymentMethod};
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_i64;

// 账单查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct InvoiceQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
    pub term: Option<String>,
    pub status: Option<InvoiceStatus>,
}

// 创建账单请求
#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    // 不填写则自动生成
    pub invoice_no: Option<String>,
    pub student_id: i64,
    pub term: String,
    pub description: Option<String>,
    // 单位：分
    pub amount: i64,
    pub due_date: Option<NaiveDate>,
}

// 审批账单
#[derive(Debug, Deserialize)]
pub struct ApproveInvoiceRequest {
    pub approved_by: i64,
}

// 登记缴费
#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    pub amount: i64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    // 不填写则为当前时间
    pub paid_at: Option<chrono::DateTime<chrono::Utc>>,
}

// 账单列表查询参数（用于存储层）
#[derive(Debug, Clone)]
pub struct InvoiceListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub term: Option<String>,
    pub status: Option<InvoiceStatus>,
}
