//! 监护人存储操作

use super::{SeaOrmStorage, search_pattern};
use crate::entity::guardians::{ActiveModel, Column, Entity as Guardians};
use crate::entity::student_guardians::{
    ActiveModel as LinkActiveModel, Column as LinkColumn, Entity as StudentGuardians,
};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginationInfo, PaginationQuery,
    guardians::{
        entities::{Guardian, StudentGuardianLink},
        requests::{CreateGuardianRequest, GuardianListQuery},
        responses::{GuardianListResponse, LinkedGuardian},
    },
    imports::entities::{GuardianImportRecord, UpsertOutcome},
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_guardian_impl(&self, req: CreateGuardianRequest) -> Result<Guardian> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            full_name: Set(req.full_name),
            phone: Set(req.phone),
            email: Set(req.email),
            relationship: Set(req.relationship),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;
        Ok(result.into_guardian())
    }

    pub async fn get_guardian_by_id_impl(&self, guardian_id: i64) -> Result<Option<Guardian>> {
        let result = Guardians::find_by_id(guardian_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询监护人失败: {e}")))?;

        Ok(result.map(|m| m.into_guardian()))
    }

    pub async fn list_guardians_with_pagination_impl(
        &self,
        query: GuardianListQuery,
    ) -> Result<GuardianListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Guardians::find();

        // 按姓名或手机号搜索
        if let Some(pattern) = search_pattern(query.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(Column::FullName.contains(&pattern))
                    .add(Column::Phone.contains(&pattern)),
            );
        }

        let paginator = select
            .order_by_asc(Column::FullName)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询监护人总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询监护人页数失败: {e}")))?;
        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询监护人列表失败: {e}")))?;

        Ok(GuardianListResponse {
            items: items.into_iter().map(|m| m.into_guardian()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 按手机号新增或覆盖
    pub async fn upsert_guardian_impl(
        &self,
        record: GuardianImportRecord,
    ) -> Result<(Guardian, UpsertOutcome)> {
        let now = chrono::Utc::now().timestamp();

        let existing = Guardians::find()
            .filter(Column::Phone.eq(record.phone.as_str()))
            .one(&self.db)
            .await?;

        if let Some(existing) = existing {
            let mut model: ActiveModel = existing.into();
            model.full_name = Set(record.full_name);
            if let Some(email) = record.email {
                model.email = Set(Some(email));
            }
            if let Some(relationship) = record.relationship {
                model.relationship = Set(Some(relationship));
            }
            model.updated_at = Set(now);
            let updated = model.update(&self.db).await?;
            return Ok((updated.into_guardian(), UpsertOutcome::Updated));
        }

        let phone = record.phone.clone();
        let model = ActiveModel {
            full_name: Set(record.full_name),
            phone: Set(record.phone),
            email: Set(record.email),
            relationship: Set(record.relationship),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Guardians::insert(model)
            .on_conflict(
                OnConflict::column(Column::Phone)
                    .update_columns([Column::FullName, Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        let guardian = Guardians::find()
            .filter(Column::Phone.eq(phone))
            .one(&self.db)
            .await?
            .ok_or_else(|| SchoolError::database_operation("导入的监护人写入后未找到"))?;

        Ok((guardian.into_guardian(), UpsertOutcome::Inserted))
    }

    /// 关联学生与监护人（幂等）。学生的第一位监护人自动设为主要监护人
    pub async fn link_guardian_impl(
        &self,
        student_id: i64,
        guardian_id: i64,
    ) -> Result<StudentGuardianLink> {
        let txn = self.db.begin().await?;

        let existing = StudentGuardians::find()
            .filter(LinkColumn::StudentId.eq(student_id))
            .filter(LinkColumn::GuardianId.eq(guardian_id))
            .one(&txn)
            .await?;
        if let Some(existing) = existing {
            return Ok(existing.into_link());
        }

        let has_primary = StudentGuardians::find()
            .filter(LinkColumn::StudentId.eq(student_id))
            .filter(LinkColumn::IsPrimary.eq(true))
            .one(&txn)
            .await?
            .is_some();

        let link = LinkActiveModel {
            student_id: Set(student_id),
            guardian_id: Set(guardian_id),
            is_primary: Set(!has_primary),
            linked_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(link.into_link())
    }

    pub async fn unlink_guardian_impl(&self, student_id: i64, guardian_id: i64) -> Result<bool> {
        let result = StudentGuardians::delete_many()
            .filter(LinkColumn::StudentId.eq(student_id))
            .filter(LinkColumn::GuardianId.eq(guardian_id))
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("解除关联失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 学生名下的监护人，主要监护人在前
    pub async fn list_student_guardians_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<LinkedGuardian>> {
        let rows = StudentGuardians::find()
            .filter(LinkColumn::StudentId.eq(student_id))
            .order_by_desc(LinkColumn::IsPrimary)
            .order_by_asc(LinkColumn::LinkedAt)
            .find_also_related(Guardians)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生监护人失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(link, guardian)| {
                guardian.map(|g| LinkedGuardian {
                    link: link.into_link(),
                    guardian: g.into_guardian(),
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::requests::CreateStudentRequest;

    async fn seed_student(storage: &SeaOrmStorage, admission_no: &str) -> i64 {
        storage
            .create_student_impl(CreateStudentRequest {
                admission_no: admission_no.to_string(),
                first_name: "Imani".to_string(),
                last_name: "Mwangi".to_string(),
                gender: None,
                date_of_birth: None,
                class_id: None,
                status: None,
            })
            .await
            .unwrap()
            .id
    }

    async fn seed_guardian(storage: &SeaOrmStorage, phone: &str) -> i64 {
        storage
            .create_guardian_impl(CreateGuardianRequest {
                full_name: format!("Guardian {phone}"),
                phone: phone.to_string(),
                email: None,
                relationship: Some("mother".to_string()),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_link_is_idempotent_and_first_is_primary() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let student_id = seed_student(&storage, "ADM-1").await;
        let mother = seed_guardian(&storage, "0711000001").await;
        let father = seed_guardian(&storage, "0711000002").await;

        let first = storage.link_guardian_impl(student_id, mother).await.unwrap();
        let again = storage.link_guardian_impl(student_id, mother).await.unwrap();
        assert_eq!(first.id, again.id);
        assert!(first.is_primary);

        let second = storage.link_guardian_impl(student_id, father).await.unwrap();
        assert!(!second.is_primary);

        let linked = storage.list_student_guardians_impl(student_id).await.unwrap();
        assert_eq!(linked.len(), 2);
        assert_eq!(linked[0].guardian.id, mother);

        assert!(storage.unlink_guardian_impl(student_id, father).await.unwrap());
        assert!(!storage.unlink_guardian_impl(student_id, father).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_phone_is_conflict() {
        let storage = SeaOrmStorage::new_in_memory().await;
        seed_guardian(&storage, "0722000000").await;
        let err = storage
            .create_guardian_impl(CreateGuardianRequest {
                full_name: "Someone Else".to_string(),
                phone: "0722000000".to_string(),
                email: None,
                relationship: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E010");
    }

    #[tokio::test]
    async fn test_upsert_guardian_by_phone() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let record = GuardianImportRecord {
            full_name: "Halima Said".to_string(),
            phone: "0733111222".to_string(),
            email: None,
            relationship: Some("aunt".to_string()),
        };

        let (created, outcome) = storage.upsert_guardian_impl(record.clone()).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Inserted);

        let mut renamed = record;
        renamed.full_name = "Halima Said Ali".to_string();
        renamed.relationship = None;
        let (updated, outcome) = storage.upsert_guardian_impl(renamed).await.unwrap();
        assert_eq!(outcome, UpsertOutcome::Updated);
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.full_name, "Halima Said Ali");
        assert_eq!(updated.relationship.as_deref(), Some("aunt"));
    }
}
