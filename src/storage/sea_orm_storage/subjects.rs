//! 科目存储操作

use super::SeaOrmStorage;
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{Result, SchoolError};
use crate::models::{
    imports::entities::{SubjectImportRecord, UpsertOutcome},
    subjects::{entities::Subject, requests::CreateSubjectRequest},
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let model = ActiveModel {
            code: Set(req.code),
            name: Set(req.name),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;
        Ok(result.into_subject())
    }

    pub async fn get_subject_by_id_impl(&self, subject_id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(subject_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    pub async fn list_subjects_impl(&self) -> Result<Vec<Subject>> {
        let subjects = Subjects::find()
            .order_by_asc(Column::Code)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询科目列表失败: {e}")))?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }

    pub async fn delete_subject_impl(&self, subject_id: i64) -> Result<bool> {
        let result = Subjects::delete_by_id(subject_id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除科目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 按科目代码新增或覆盖名称
    pub async fn upsert_subject_impl(&self, record: SubjectImportRecord) -> Result<UpsertOutcome> {
        let existed = Subjects::find()
            .filter(Column::Code.eq(record.code.as_str()))
            .one(&self.db)
            .await?
            .is_some();

        let model = ActiveModel {
            code: Set(record.code),
            name: Set(record.name),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        Subjects::insert(model)
            .on_conflict(
                OnConflict::column(Column::Code)
                    .update_column(Column::Name)
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        Ok(if existed {
            UpsertOutcome::Updated
        } else {
            UpsertOutcome::Inserted
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subject_upsert_and_order() {
        let storage = SeaOrmStorage::new_in_memory().await;

        let outcome = storage
            .upsert_subject_impl(SubjectImportRecord {
                code: "PHY".to_string(),
                name: "Physics".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Inserted);

        storage
            .create_subject_impl(CreateSubjectRequest {
                code: "BIO".to_string(),
                name: "Biology".to_string(),
            })
            .await
            .unwrap();

        let outcome = storage
            .upsert_subject_impl(SubjectImportRecord {
                code: "PHY".to_string(),
                name: "Physics & Lab".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Updated);

        let subjects = storage.list_subjects_impl().await.unwrap();
        let codes: Vec<_> = subjects.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, ["BIO", "PHY"]);
        assert_eq!(subjects[1].name, "Physics & Lab");
    }
}
