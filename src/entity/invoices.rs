//! 账单实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub invoice_no: String,
    pub student_id: i64,
    pub term: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub amount: i64,
    pub balance: i64,
    pub status: String,
    pub due_date: Option<String>,
    pub approved_by: Option<i64>,
    pub approved_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn invoice_status(&self) -> crate::models::invoices::entities::InvoiceStatus {
        use crate::models::invoices::entities::InvoiceStatus;

        self.status
            .parse::<InvoiceStatus>()
            .unwrap_or_else(|_| InvoiceStatus::for_balance(self.amount, self.balance))
    }

    pub fn into_invoice(self) -> crate::models::invoices::entities::Invoice {
        use crate::models::invoices::entities::Invoice;

        let status = self.invoice_status();
        Invoice {
            id: self.id,
            invoice_no: self.invoice_no,
            student_id: self.student_id,
            term: self.term,
            description: self.description,
            amount: self.amount,
            balance: self.balance,
            status,
            due_date: super::parse_stored_date(self.due_date.as_deref()),
            approved_by: self.approved_by,
            approved_at: self.approved_at.map(super::timestamp_to_datetime),
            created_at: super::timestamp_to_datetime(self.created_at),
            updated_at: super::timestamp_to_datetime(self.updated_at),
        }
    }
}
