//! 账单与缴费存储操作
//!
//! 缴费与作废都在单个事务内完成：读取账单、计算新余额、写缴费记录、
//! 以原余额为条件更新账单。条件更新未命中说明余额已被并发修改，事务回滚。

use super::SeaOrmStorage;
use crate::entity::format_date;
use crate::entity::invoices::{
    ActiveModel as InvoiceActiveModel, Column as InvoiceColumn, Entity as Invoices,
    Model as InvoiceModel,
};
use crate::entity::payments::{
    ActiveModel as PaymentActiveModel, Column as PaymentColumn, Entity as Payments,
};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginationInfo, PaginationQuery,
    invoices::{
        entities::{Invoice, InvoiceStatus, Payment},
        ledger::{self, LedgerUpdate},
        requests::{CreateInvoiceRequest, InvoiceListQuery, RecordPaymentRequest},
        responses::{InvoiceListResponse, PaymentReceipt},
    },
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::{info, warn};

impl SeaOrmStorage {
    /// 创建账单，余额等于应收总额
    pub async fn create_invoice_impl(&self, req: CreateInvoiceRequest) -> Result<Invoice> {
        let now = chrono::Utc::now();
        let invoice_no = req
            .invoice_no
            .unwrap_or_else(|| ledger::generate_invoice_no(now.date_naive()));

        let model = InvoiceActiveModel {
            invoice_no: Set(invoice_no),
            student_id: Set(req.student_id),
            term: Set(req.term),
            description: Set(req.description),
            amount: Set(req.amount),
            balance: Set(req.amount),
            status: Set(InvoiceStatus::Unpaid.to_string()),
            due_date: Set(req.due_date.map(format_date)),
            approved_by: Set(None),
            approved_at: Set(None),
            created_at: Set(now.timestamp()),
            updated_at: Set(now.timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;
        Ok(result.into_invoice())
    }

    pub async fn get_invoice_by_id_impl(&self, invoice_id: i64) -> Result<Option<Invoice>> {
        let result = Invoices::find_by_id(invoice_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询账单失败: {e}")))?;

        Ok(result.map(|m| m.into_invoice()))
    }

    pub async fn list_invoices_with_pagination_impl(
        &self,
        query: InvoiceListQuery,
    ) -> Result<InvoiceListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Invoices::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(InvoiceColumn::StudentId.eq(student_id));
        }
        if let Some(ref term) = query.term
            && !term.trim().is_empty()
        {
            select = select.filter(InvoiceColumn::Term.eq(term.trim()));
        }
        if let Some(status) = query.status {
            select = select.filter(InvoiceColumn::Status.eq(status.as_str()));
        }

        let paginator = select
            .order_by_desc(InvoiceColumn::CreatedAt)
            .order_by_desc(InvoiceColumn::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询账单总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询账单页数失败: {e}")))?;
        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询账单列表失败: {e}")))?;

        Ok(InvoiceListResponse {
            items: items.into_iter().map(|m| m.into_invoice()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn list_student_invoices_impl(&self, student_id: i64) -> Result<Vec<Invoice>> {
        let invoices = Invoices::find()
            .filter(InvoiceColumn::StudentId.eq(student_id))
            .order_by_asc(InvoiceColumn::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生账单失败: {e}")))?;

        Ok(invoices.into_iter().map(|m| m.into_invoice()).collect())
    }

    /// 审批账单：已审批或已取消的账单不可再审批
    pub async fn approve_invoice_impl(&self, invoice_id: i64, approved_by: i64) -> Result<Invoice> {
        let txn = self.db.begin().await?;
        let invoice = find_invoice(&txn, invoice_id).await?;

        if invoice.invoice_status() == InvoiceStatus::Cancelled {
            return Err(SchoolError::conflict("Invoice has been cancelled"));
        }
        if invoice.approved_at.is_some() {
            return Err(SchoolError::conflict("Invoice has already been approved"));
        }

        let now = chrono::Utc::now().timestamp();
        let result = Invoices::update_many()
            .col_expr(InvoiceColumn::ApprovedBy, Expr::value(approved_by))
            .col_expr(InvoiceColumn::ApprovedAt, Expr::value(now))
            .col_expr(InvoiceColumn::UpdatedAt, Expr::value(now))
            .filter(InvoiceColumn::Id.eq(invoice_id))
            .filter(InvoiceColumn::ApprovedAt.is_null())
            .exec(&txn)
            .await?;
        if result.rows_affected == 0 {
            return Err(SchoolError::conflict("Invoice has already been approved"));
        }

        let updated = find_invoice(&txn, invoice_id).await?;
        txn.commit().await?;

        info!("Invoice {} approved by staff {}", updated.invoice_no, approved_by);
        Ok(updated.into_invoice())
    }

    /// 取消账单：仅在没有任何缴费记录时允许
    pub async fn cancel_invoice_impl(&self, invoice_id: i64) -> Result<Invoice> {
        let txn = self.db.begin().await?;
        let invoice = find_invoice(&txn, invoice_id).await?;

        if invoice.invoice_status() == InvoiceStatus::Cancelled {
            return Err(SchoolError::conflict("Invoice has been cancelled"));
        }

        let payment_count = Payments::find()
            .filter(PaymentColumn::InvoiceId.eq(invoice_id))
            .count(&txn)
            .await?;
        if payment_count > 0 {
            return Err(SchoolError::validation(
                "Invoice with recorded payments cannot be cancelled",
            ));
        }

        let now = chrono::Utc::now().timestamp();
        let mut model: InvoiceActiveModel = invoice.into();
        model.status = Set(InvoiceStatus::Cancelled.to_string());
        model.updated_at = Set(now);
        let updated = model.update(&txn).await?;

        txn.commit().await?;
        Ok(updated.into_invoice())
    }

    pub async fn list_payments_impl(&self, invoice_id: i64) -> Result<Vec<Payment>> {
        let payments = Payments::find()
            .filter(PaymentColumn::InvoiceId.eq(invoice_id))
            .order_by_asc(PaymentColumn::PaidAt)
            .order_by_asc(PaymentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询缴费记录失败: {e}")))?;

        Ok(payments.into_iter().map(|m| m.into_payment()).collect())
    }

    pub async fn get_payment_by_id_impl(&self, payment_id: i64) -> Result<Option<Payment>> {
        let result = Payments::find_by_id(payment_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询缴费记录失败: {e}")))?;

        Ok(result.map(|m| m.into_payment()))
    }

    /// 登记缴费
    pub async fn record_payment_impl(
        &self,
        invoice_id: i64,
        req: RecordPaymentRequest,
    ) -> Result<PaymentReceipt> {
        let txn = self.db.begin().await?;

        // 1. 读取账单
        let invoice = find_invoice(&txn, invoice_id).await?;

        // 2-4. 计算新余额与状态
        let update = ledger::apply_payment(
            invoice.amount,
            invoice.balance,
            invoice.invoice_status(),
            req.amount,
        )?;

        // 5. 写缴费记录，并以原余额为条件更新账单
        let paid_at = req.paid_at.unwrap_or_else(chrono::Utc::now).timestamp();
        let payment = PaymentActiveModel {
            invoice_id: Set(invoice_id),
            amount: Set(req.amount),
            method: Set(req.method.to_string()),
            reference: Set(req.reference),
            paid_at: Set(paid_at),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        compare_and_set_balance(&txn, &invoice, update).await?;
        let updated = find_invoice(&txn, invoice_id).await?;

        // 6. 提交
        txn.commit().await?;

        info!(
            "Payment {} of {} recorded on invoice {}: balance {} -> {} ({})",
            payment.id, payment.amount, updated.invoice_no, invoice.balance, update.balance, update.status
        );

        Ok(PaymentReceipt {
            payment: payment.into_payment(),
            invoice: updated.into_invoice(),
        })
    }

    /// 作废缴费：删除记录并把金额加回余额
    pub async fn void_payment_impl(&self, payment_id: i64) -> Result<Invoice> {
        let txn = self.db.begin().await?;

        let payment = Payments::find_by_id(payment_id)
            .one(&txn)
            .await?
            .ok_or_else(|| SchoolError::not_found(format!("Payment {payment_id} not found")))?;
        let invoice = find_invoice(&txn, payment.invoice_id).await?;

        let update = ledger::reverse_payment(
            invoice.amount,
            invoice.balance,
            invoice.invoice_status(),
            payment.amount,
        )?;

        Payments::delete_by_id(payment_id).exec(&txn).await?;
        compare_and_set_balance(&txn, &invoice, update).await?;
        let updated = find_invoice(&txn, invoice.id).await?;

        txn.commit().await?;

        info!(
            "Payment {} voided on invoice {}: balance {} -> {}",
            payment_id, updated.invoice_no, invoice.balance, update.balance
        );
        Ok(updated.into_invoice())
    }
}

async fn find_invoice<C: ConnectionTrait>(conn: &C, invoice_id: i64) -> Result<InvoiceModel> {
    Invoices::find_by_id(invoice_id)
        .one(conn)
        .await?
        .ok_or_else(|| SchoolError::not_found(format!("Invoice {invoice_id} not found")))
}

/// 仅当余额仍为读取时的值才写入
async fn compare_and_set_balance<C: ConnectionTrait>(
    conn: &C,
    invoice: &InvoiceModel,
    update: LedgerUpdate,
) -> Result<()> {
    let result = Invoices::update_many()
        .col_expr(InvoiceColumn::Balance, Expr::value(update.balance))
        .col_expr(InvoiceColumn::Status, Expr::value(update.status.as_str()))
        .col_expr(
            InvoiceColumn::UpdatedAt,
            Expr::value(chrono::Utc::now().timestamp()),
        )
        .filter(InvoiceColumn::Id.eq(invoice.id))
        .filter(InvoiceColumn::Balance.eq(invoice.balance))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        warn!(
            "Invoice {} balance changed concurrently, rolling back",
            invoice.invoice_no
        );
        return Err(SchoolError::concurrent_update(format!(
            "Invoice {} was modified by another request, please retry",
            invoice.invoice_no
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::invoices::entities::PaymentMethod;
    use crate::models::staff::requests::CreateStaffRequest;
    use crate::models::students::requests::CreateStudentRequest;

    async fn seed(storage: &SeaOrmStorage, amount: i64) -> Invoice {
        let student = storage
            .create_student_impl(CreateStudentRequest {
                admission_no: format!("ADM-{amount}"),
                first_name: "Wanjiku".to_string(),
                last_name: "Kariuki".to_string(),
                gender: None,
                date_of_birth: None,
                class_id: None,
                status: None,
            })
            .await
            .unwrap();

        storage
            .create_invoice_impl(CreateInvoiceRequest {
                invoice_no: None,
                student_id: student.id,
                term: "2025-T1".to_string(),
                description: Some("Tuition".to_string()),
                amount,
                due_date: None,
            })
            .await
            .unwrap()
    }

    fn payment(amount: i64) -> RecordPaymentRequest {
        RecordPaymentRequest {
            amount,
            method: PaymentMethod::Mobile,
            reference: Some("QWE123".to_string()),
            paid_at: None,
        }
    }

    #[tokio::test]
    async fn test_new_invoice_is_unpaid_with_full_balance() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let invoice = seed(&storage, 12_000).await;
        assert_eq!(invoice.balance, 12_000);
        assert_eq!(invoice.status, InvoiceStatus::Unpaid);
        assert!(invoice.invoice_no.starts_with("INV-"));
    }

    #[tokio::test]
    async fn test_payments_move_status_through_ledger() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let invoice = seed(&storage, 10_000).await;

        let receipt = storage
            .record_payment_impl(invoice.id, payment(2_500))
            .await
            .unwrap();
        assert_eq!(receipt.invoice.balance, 7_500);
        assert_eq!(receipt.invoice.status, InvoiceStatus::Partial);
        assert_eq!(receipt.payment.amount, 2_500);

        let receipt = storage
            .record_payment_impl(invoice.id, payment(9_000))
            .await
            .unwrap();
        assert_eq!(receipt.invoice.balance, -1_500);
        assert_eq!(receipt.invoice.status, InvoiceStatus::Paid);

        let payments = storage.list_payments_impl(invoice.id).await.unwrap();
        assert_eq!(payments.len(), 2);
    }

    #[tokio::test]
    async fn test_rejected_payment_leaves_no_trace() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let invoice = seed(&storage, 5_000).await;

        let err = storage
            .record_payment_impl(invoice.id, payment(-10))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");

        let err = storage
            .record_payment_impl(9_999, payment(100))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E008");

        assert!(storage.list_payments_impl(invoice.id).await.unwrap().is_empty());
        let reloaded = storage.get_invoice_by_id_impl(invoice.id).await.unwrap().unwrap();
        assert_eq!(reloaded.balance, 5_000);
    }

    #[tokio::test]
    async fn test_stale_balance_rolls_back() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let invoice = seed(&storage, 5_000).await;

        let txn = storage.db.begin().await.unwrap();
        let mut stale = find_invoice(&txn, invoice.id).await.unwrap();
        stale.balance = 4_000;
        let update = ledger::apply_payment(5_000, 4_000, InvoiceStatus::Unpaid, 1_000).unwrap();
        let err = compare_and_set_balance(&txn, &stale, update)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E013");
        drop(txn);

        let reloaded = storage.get_invoice_by_id_impl(invoice.id).await.unwrap().unwrap();
        assert_eq!(reloaded.balance, 5_000);
    }

    #[tokio::test]
    async fn test_void_payment_restores_balance() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let invoice = seed(&storage, 8_000).await;

        let receipt = storage
            .record_payment_impl(invoice.id, payment(8_000))
            .await
            .unwrap();
        assert_eq!(receipt.invoice.status, InvoiceStatus::Paid);

        let restored = storage.void_payment_impl(receipt.payment.id).await.unwrap();
        assert_eq!(restored.balance, 8_000);
        assert_eq!(restored.status, InvoiceStatus::Unpaid);
        assert!(
            storage
                .get_payment_by_id_impl(receipt.payment.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_approve_once_and_cancel_rules() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let bursar = storage
            .create_staff_impl(CreateStaffRequest {
                staff_no: "B-01".to_string(),
                full_name: "Bursar".to_string(),
                email: None,
                phone: None,
                position: None,
            })
            .await
            .unwrap();
        let invoice = seed(&storage, 3_000).await;

        let approved = storage
            .approve_invoice_impl(invoice.id, bursar.id)
            .await
            .unwrap();
        assert_eq!(approved.approved_by, Some(bursar.id));
        assert!(approved.approved_at.is_some());

        let err = storage
            .approve_invoice_impl(invoice.id, bursar.id)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E010");

        storage
            .record_payment_impl(invoice.id, payment(1_000))
            .await
            .unwrap();
        let err = storage.cancel_invoice_impl(invoice.id).await.unwrap_err();
        assert_eq!(err.code(), "E007");

        let other = seed(&storage, 4_000).await;
        let cancelled = storage.cancel_invoice_impl(other.id).await.unwrap();
        assert_eq!(cancelled.status, InvoiceStatus::Cancelled);

        let err = storage
            .record_payment_impl(other.id, payment(100))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E010");
        let err = storage
            .approve_invoice_impl(other.id, bursar.id)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E010");
    }
}
