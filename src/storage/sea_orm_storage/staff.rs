//! 教职工存储操作

use super::{SeaOrmStorage, search_pattern};
use crate::entity::staff::{ActiveModel, Column, Entity as StaffEntity};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginationInfo, PaginationQuery,
    imports::entities::{StaffImportRecord, UpsertOutcome},
    staff::{
        entities::{Staff, StaffPosition, StaffStatus},
        requests::{CreateStaffRequest, StaffListQuery, UpdateStaffRequest},
        responses::StaffListResponse,
    },
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建教职工
    pub async fn create_staff_impl(&self, req: CreateStaffRequest) -> Result<Staff> {
        let now = chrono::Utc::now().timestamp();
        let position = req.position.unwrap_or(StaffPosition::Teacher);

        let model = ActiveModel {
            staff_no: Set(req.staff_no),
            full_name: Set(req.full_name),
            email: Set(req.email),
            phone: Set(req.phone),
            position: Set(position.to_string()),
            status: Set(StaffStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;
        Ok(result.into_staff())
    }

    /// 通过 ID 获取教职工
    pub async fn get_staff_by_id_impl(&self, staff_id: i64) -> Result<Option<Staff>> {
        let result = StaffEntity::find_by_id(staff_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教职工失败: {e}")))?;

        Ok(result.map(|m| m.into_staff()))
    }

    /// 分页列出教职工
    pub async fn list_staff_with_pagination_impl(
        &self,
        query: StaffListQuery,
    ) -> Result<StaffListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = StaffEntity::find();

        if let Some(position) = query.position {
            select = select.filter(Column::Position.eq(position.as_str()));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }

        // 按姓名或工号搜索
        if let Some(pattern) = search_pattern(query.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(Column::FullName.contains(&pattern))
                    .add(Column::StaffNo.contains(&pattern)),
            );
        }

        let paginator = select
            .order_by_asc(Column::StaffNo)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教职工总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教职工页数失败: {e}")))?;
        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询教职工列表失败: {e}")))?;

        Ok(StaffListResponse {
            items: items.into_iter().map(|m| m.into_staff()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新教职工信息
    pub async fn update_staff_impl(
        &self,
        staff_id: i64,
        update: UpdateStaffRequest,
    ) -> Result<Option<Staff>> {
        if self.get_staff_by_id_impl(staff_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(staff_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(full_name) = update.full_name {
            model.full_name = Set(full_name);
        }
        if let Some(email) = update.email {
            model.email = Set(Some(email));
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(position) = update.position {
            model.position = Set(position.to_string());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model.update(&self.db).await?;

        self.get_staff_by_id_impl(staff_id).await
    }

    /// 删除教职工
    pub async fn delete_staff_impl(&self, staff_id: i64) -> Result<bool> {
        let result = StaffEntity::delete_by_id(staff_id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除教职工失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 按工号新增或覆盖（未提供的可选字段保持原值）
    pub async fn upsert_staff_impl(&self, record: StaffImportRecord) -> Result<UpsertOutcome> {
        let now = chrono::Utc::now().timestamp();

        let existing = StaffEntity::find()
            .filter(Column::StaffNo.eq(record.staff_no.as_str()))
            .one(&self.db)
            .await?;

        if let Some(existing) = existing {
            let mut model: ActiveModel = existing.into();
            model.full_name = Set(record.full_name);
            if let Some(email) = record.email {
                model.email = Set(Some(email));
            }
            if let Some(phone) = record.phone {
                model.phone = Set(Some(phone));
            }
            if let Some(position) = record.position {
                model.position = Set(position.to_string());
            }
            model.updated_at = Set(now);
            model.update(&self.db).await?;
            return Ok(UpsertOutcome::Updated);
        }

        let model = ActiveModel {
            staff_no: Set(record.staff_no),
            full_name: Set(record.full_name),
            email: Set(record.email),
            phone: Set(record.phone),
            position: Set(record
                .position
                .unwrap_or(StaffPosition::Teacher)
                .to_string()),
            status: Set(StaffStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        // 并发导入同一工号时退化为覆盖
        StaffEntity::insert(model)
            .on_conflict(
                OnConflict::column(Column::StaffNo)
                    .update_columns([Column::FullName, Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        Ok(UpsertOutcome::Inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(staff_no: &str, name: &str) -> StaffImportRecord {
        StaffImportRecord {
            staff_no: staff_no.to_string(),
            full_name: name.to_string(),
            email: None,
            phone: None,
            position: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_staff_keeps_unspecified_fields() {
        let storage = SeaOrmStorage::new_in_memory().await;

        let mut first = record("T-001", "Grace Wanjiru");
        first.email = Some("grace@school.test".to_string());
        first.position = Some(StaffPosition::Admin);
        assert_eq!(
            storage.upsert_staff_impl(first).await.unwrap(),
            UpsertOutcome::Inserted
        );

        assert_eq!(
            storage
                .upsert_staff_impl(record("T-001", "Grace W. Otieno"))
                .await
                .unwrap(),
            UpsertOutcome::Updated
        );

        let list = storage
            .list_staff_with_pagination_impl(StaffListQuery {
                page: None,
                size: None,
                position: None,
                status: None,
                search: Some("t-001".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(list.items.len(), 1);
        let staff = &list.items[0];
        assert_eq!(staff.full_name, "Grace W. Otieno");
        assert_eq!(staff.email.as_deref(), Some("grace@school.test"));
        assert_eq!(staff.position, StaffPosition::Admin);
    }

    #[tokio::test]
    async fn test_filter_by_position() {
        let storage = SeaOrmStorage::new_in_memory().await;
        for (no, position) in [
            ("T-1", StaffPosition::Teacher),
            ("A-1", StaffPosition::Admin),
            ("T-2", StaffPosition::Teacher),
        ] {
            storage
                .create_staff_impl(CreateStaffRequest {
                    staff_no: no.to_string(),
                    full_name: format!("Staff {no}"),
                    email: None,
                    phone: None,
                    position: Some(position),
                })
                .await
                .unwrap();
        }

        let teachers = storage
            .list_staff_with_pagination_impl(StaffListQuery {
                page: Some(1),
                size: Some(10),
                position: Some(StaffPosition::Teacher),
                status: None,
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(teachers.pagination.total, 2);
        assert!(
            teachers
                .items
                .iter()
                .all(|s| s.position == StaffPosition::Teacher)
        );
    }
}
