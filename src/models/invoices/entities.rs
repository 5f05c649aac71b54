use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

crate::string_enum! {
    // 账单状态
    pub enum InvoiceStatus {
        Unpaid => "unpaid",
        Partial => "partial",
        Paid => "paid",
        Cancelled => "cancelled",
    }
}

crate::string_enum! {
    // 缴费方式
    pub enum PaymentMethod {
        Cash => "cash",
        Bank => "bank",
        Mobile => "mobile",
        Card => "card",
    }
}

// 账单实体，金额单位为分
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    pub invoice_no: String,
    pub student_id: i64,
    pub term: String,
    pub description: Option<String>,
    // 应收总额
    pub amount: i64,
    // 未结余额，超额缴费时为负数
    pub balance: i64,
    pub status: InvoiceStatus,
    pub due_date: Option<NaiveDate>,
    pub approved_by: Option<i64>,
    pub approved_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Invoice {
    /// 已缴金额
    pub fn amount_paid(&self) -> i64 {
        self.amount - self.balance
    }
}

// 缴费记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub invoice_id: i64,
    pub amount: i64,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub paid_at: chrono::DateTime<chrono::Utc>,
}
