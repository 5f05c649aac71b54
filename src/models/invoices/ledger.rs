//! 账单余额记账规则
//!
//! 缴费：`新余额 = 原余额 - 缴费金额`；余额 <= 0 为 paid，余额仍等于（或高于）应收总额为 unpaid，
//! 其余为 partial。作废缴费按相反方向计算。存储层在事务中应用这些结果。

use crate::errors::{Result, SchoolError};

use super::entities::InvoiceStatus;

/// 一次记账后的账单状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerUpdate {
    pub balance: i64,
    pub status: InvoiceStatus,
}

impl InvoiceStatus {
    /// 根据应收总额与余额推导状态
    pub fn for_balance(amount: i64, balance: i64) -> Self {
        if balance <= 0 {
            InvoiceStatus::Paid
        } else if balance >= amount {
            InvoiceStatus::Unpaid
        } else {
            InvoiceStatus::Partial
        }
    }
}

/// 计算缴费后的余额与状态
pub fn apply_payment(
    amount: i64,
    balance: i64,
    status: InvoiceStatus,
    payment: i64,
) -> Result<LedgerUpdate> {
    if status == InvoiceStatus::Cancelled {
        return Err(SchoolError::conflict("Invoice has been cancelled"));
    }
    if payment <= 0 {
        return Err(SchoolError::validation(
            "Payment amount must be greater than zero",
        ));
    }

    let new_balance = balance
        .checked_sub(payment)
        .ok_or_else(|| SchoolError::validation("Payment amount is out of range"))?;

    Ok(LedgerUpdate {
        balance: new_balance,
        status: InvoiceStatus::for_balance(amount, new_balance),
    })
}

/// 计算作废一笔缴费后的余额与状态
pub fn reverse_payment(
    amount: i64,
    balance: i64,
    status: InvoiceStatus,
    payment: i64,
) -> Result<LedgerUpdate> {
    if status == InvoiceStatus::Cancelled {
        return Err(SchoolError::conflict("Invoice has been cancelled"));
    }

    let new_balance = balance
        .checked_add(payment)
        .ok_or_else(|| SchoolError::validation("Payment amount is out of range"))?;

    Ok(LedgerUpdate {
        balance: new_balance,
        status: InvoiceStatus::for_balance(amount, new_balance),
    })
}

/// 生成账单号：INV-YYYYMMDD-XXXXXX
pub fn generate_invoice_no(date: chrono::NaiveDate) -> String {
    format!(
        "INV-{}-{}",
        date.format("%Y%m%d"),
        crate::utils::random_code::generate_random_code(6)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_thresholds() {
        assert_eq!(InvoiceStatus::for_balance(10_000, 10_000), InvoiceStatus::Unpaid);
        assert_eq!(InvoiceStatus::for_balance(10_000, 1), InvoiceStatus::Partial);
        assert_eq!(InvoiceStatus::for_balance(10_000, 0), InvoiceStatus::Paid);
        assert_eq!(InvoiceStatus::for_balance(10_000, -500), InvoiceStatus::Paid);
    }

    #[test]
    fn test_partial_then_full_payment() {
        let first = apply_payment(10_000, 10_000, InvoiceStatus::Unpaid, 4_000).unwrap();
        assert_eq!(first.balance, 6_000);
        assert_eq!(first.status, InvoiceStatus::Partial);

        let second = apply_payment(10_000, first.balance, first.status, 6_000).unwrap();
        assert_eq!(second.balance, 0);
        assert_eq!(second.status, InvoiceStatus::Paid);
    }

    #[test]
    fn test_overpayment_leaves_credit() {
        let update = apply_payment(5_000, 5_000, InvoiceStatus::Unpaid, 7_500).unwrap();
        assert_eq!(update.balance, -2_500);
        assert_eq!(update.status, InvoiceStatus::Paid);
    }

    #[test]
    fn test_rejects_non_positive_and_cancelled() {
        let err = apply_payment(5_000, 5_000, InvoiceStatus::Unpaid, 0).unwrap_err();
        assert_eq!(err.code(), "E007");

        let err = apply_payment(5_000, 5_000, InvoiceStatus::Cancelled, 100).unwrap_err();
        assert_eq!(err.code(), "E010");
    }

    #[test]
    fn test_reverse_restores_status() {
        let paid = apply_payment(8_000, 3_000, InvoiceStatus::Partial, 3_000).unwrap();
        assert_eq!(paid.status, InvoiceStatus::Paid);

        let reversed = reverse_payment(8_000, paid.balance, paid.status, 3_000).unwrap();
        assert_eq!(reversed.balance, 3_000);
        assert_eq!(reversed.status, InvoiceStatus::Partial);

        let untouched = reverse_payment(8_000, 3_000, InvoiceStatus::Partial, 5_000).unwrap();
        assert_eq!(untouched.status, InvoiceStatus::Unpaid);
    }

    #[test]
    fn test_invoice_no_format() {
        let date = chrono::NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        let no = generate_invoice_no(date);
        assert!(no.starts_with("INV-20250309-"));
        assert_eq!(no.len(), "INV-20250309-".len() + 6);
    }
}
