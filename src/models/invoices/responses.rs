use super::entities::{Invoice, Payment};
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 账单列表响应
#[derive(Debug, Serialize)]
pub struct InvoiceListResponse {
    pub items: Vec<Invoice>,
    pub pagination: PaginationInfo,
}

// 账单详情（含缴费记录）
#[derive(Debug, Serialize)]
pub struct InvoiceDetailResponse {
    pub invoice: Invoice,
    pub amount_paid: i64,
    pub payments: Vec<Payment>,
}

// 缴费回执
#[derive(Debug, Serialize)]
pub struct PaymentReceipt {
    pub payment: Payment,
    pub invoice: Invoice,
}

// 学生账户汇总（不含已取消账单）
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct StudentStatement {
    pub student_id: i64,
    pub invoice_count: i64,
    pub total_billed: i64,
    pub total_paid: i64,
    pub outstanding: i64,
}

impl StudentStatement {
    pub fn from_invoices(student_id: i64, invoices: &[Invoice]) -> Self {
        invoices
            .iter()
            .filter(|inv| inv.status != super::entities::InvoiceStatus::Cancelled)
            .fold(
                Self {
                    student_id,
                    ..Default::default()
                },
                |mut acc, inv| {
                    acc.invoice_count += 1;
                    acc.total_billed += inv.amount;
                    acc.total_paid += inv.amount_paid();
                    acc.outstanding += inv.balance;
                    acc
                },
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::invoices::entities::InvoiceStatus;

    fn invoice(id: i64, amount: i64, balance: i64, status: InvoiceStatus) -> Invoice {
        let now = chrono::Utc::now();
        Invoice {
            id,
            invoice_no: format!("INV-20250110-{id:06}"),
            student_id: 7,
            term: "2025-T1".to_string(),
            description: None,
            amount,
            balance,
            status,
            due_date: None,
            approved_by: None,
            approved_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_statement_skips_cancelled_invoices() {
        let invoices = [
            invoice(1, 10_000, 4_000, InvoiceStatus::Partial),
            invoice(2, 25_000, 25_000, InvoiceStatus::Cancelled),
            invoice(3, 3_000, -500, InvoiceStatus::Paid),
        ];

        let statement = StudentStatement::from_invoices(7, &invoices);
        assert_eq!(
            statement,
            StudentStatement {
                student_id: 7,
                invoice_count: 2,
                total_billed: 13_000,
                total_paid: 9_500,
                outstanding: 3_500,
            }
        );
    }

    #[test]
    fn test_statement_of_only_cancelled_is_empty() {
        let invoices = [invoice(4, 8_000, 8_000, InvoiceStatus::Cancelled)];
        let statement = StudentStatement::from_invoices(7, &invoices);
        assert_eq!(statement.invoice_count, 0);
        assert_eq!(statement.total_billed, 0);
        assert_eq!(statement.outstanding, 0);
    }
}
