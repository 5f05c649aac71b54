//! 学生存储操作

use super::{SeaOrmStorage, search_pattern};
use crate::entity::format_date;
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginationInfo, PaginationQuery,
    imports::entities::{StudentImportRecord, UpsertOutcome},
    students::{
        entities::{Student, StudentStatus},
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建学生
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            admission_no: Set(req.admission_no),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            gender: Set(req.gender.map(|g| g.to_string())),
            date_of_birth: Set(req.date_of_birth.map(format_date)),
            class_id: Set(req.class_id),
            status: Set(req.status.unwrap_or(StudentStatus::Active).to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;
        Ok(result.into_student())
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, student_id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(student_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 通过学号获取学生
    pub async fn get_student_by_admission_no_impl(
        &self,
        admission_no: &str,
    ) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::AdmissionNo.eq(admission_no))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 分页列出学生
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Students::find();

        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }

        // 按姓名或学号搜索
        if let Some(pattern) = search_pattern(query.search.as_deref()) {
            select = select.filter(
                Condition::any()
                    .add(Column::FirstName.contains(&pattern))
                    .add(Column::LastName.contains(&pattern))
                    .add(Column::AdmissionNo.contains(&pattern)),
            );
        }

        let paginator = select
            .order_by_asc(Column::LastName)
            .order_by_asc(Column::FirstName)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生页数失败: {e}")))?;
        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(StudentListResponse {
            items: items.into_iter().map(|m| m.into_student()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新学生信息
    pub async fn update_student_impl(
        &self,
        student_id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        if self.get_student_by_id_impl(student_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(student_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(first_name) = update.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(gender) = update.gender {
            model.gender = Set(Some(gender.to_string()));
        }
        if let Some(date_of_birth) = update.date_of_birth {
            model.date_of_birth = Set(Some(format_date(date_of_birth)));
        }
        if let Some(class_id) = update.class_id {
            model.class_id = Set(Some(class_id));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model.update(&self.db).await?;

        self.get_student_by_id_impl(student_id).await
    }

    /// 删除学生
    pub async fn delete_student_impl(&self, student_id: i64) -> Result<bool> {
        let result = Students::delete_by_id(student_id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 按学号新增或覆盖（未提供的可选字段保持原值）
    pub async fn upsert_student_impl(&self, record: StudentImportRecord) -> Result<UpsertOutcome> {
        let now = chrono::Utc::now().timestamp();

        let existing = Students::find()
            .filter(Column::AdmissionNo.eq(record.admission_no.as_str()))
            .one(&self.db)
            .await?;

        if let Some(existing) = existing {
            let mut model: ActiveModel = existing.into();
            model.first_name = Set(record.first_name);
            model.last_name = Set(record.last_name);
            if let Some(gender) = record.gender {
                model.gender = Set(Some(gender.to_string()));
            }
            if let Some(date_of_birth) = record.date_of_birth {
                model.date_of_birth = Set(Some(format_date(date_of_birth)));
            }
            if let Some(class_id) = record.class_id {
                model.class_id = Set(Some(class_id));
            }
            if let Some(status) = record.status {
                model.status = Set(status.to_string());
            }
            model.updated_at = Set(now);
            model.update(&self.db).await?;
            return Ok(UpsertOutcome::Updated);
        }

        let model = ActiveModel {
            admission_no: Set(record.admission_no),
            first_name: Set(record.first_name),
            last_name: Set(record.last_name),
            gender: Set(record.gender.map(|g| g.to_string())),
            date_of_birth: Set(record.date_of_birth.map(format_date)),
            class_id: Set(record.class_id),
            status: Set(record.status.unwrap_or(StudentStatus::Active).to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Students::insert(model)
            .on_conflict(
                OnConflict::column(Column::AdmissionNo)
                    .update_columns([Column::FirstName, Column::LastName, Column::UpdatedAt])
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
    use crate::models::classes::requests::CreateClassRequest;
    use crate::models::students::entities::Gender;
    use chrono::NaiveDate;

    fn create_request(admission_no: &str, first: &str, last: &str) -> CreateStudentRequest {
        CreateStudentRequest {
            admission_no: admission_no.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            gender: None,
            date_of_birth: None,
            class_id: None,
            status: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_filter_students() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let class = storage
            .create_class_impl(CreateClassRequest {
                name: "Grade 4 East".to_string(),
                grade_level: Some(4),
                class_teacher_id: None,
            })
            .await
            .unwrap();

        let mut req = create_request("ADM-001", "Amina", "Yusuf");
        req.class_id = Some(class.id);
        req.gender = Some(Gender::Female);
        req.date_of_birth = NaiveDate::from_ymd_opt(2014, 5, 17);
        let amina = storage.create_student_impl(req).await.unwrap();
        assert_eq!(amina.status, StudentStatus::Active);
        assert_eq!(amina.date_of_birth, NaiveDate::from_ymd_opt(2014, 5, 17));

        storage
            .create_student_impl(create_request("ADM-002", "Brian", "Kamau"))
            .await
            .unwrap();

        let in_class = storage
            .list_students_with_pagination_impl(StudentListQuery {
                page: None,
                size: None,
                class_id: Some(class.id),
                status: None,
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(in_class.pagination.total, 1);
        assert_eq!(in_class.items[0].admission_no, "ADM-001");

        let searched = storage
            .list_students_with_pagination_impl(StudentListQuery {
                page: None,
                size: None,
                class_id: None,
                status: None,
                search: Some("kamau".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(searched.items.len(), 1);
        assert_eq!(searched.items[0].first_name, "Brian");
    }

    #[tokio::test]
    async fn test_deleting_class_detaches_students() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let class = storage
            .create_class_impl(CreateClassRequest {
                name: "Form 3".to_string(),
                grade_level: None,
                class_teacher_id: None,
            })
            .await
            .unwrap();

        let mut req = create_request("ADM-010", "Zawadi", "Njeri");
        req.class_id = Some(class.id);
        let student = storage.create_student_impl(req).await.unwrap();

        storage.delete_class_impl(class.id).await.unwrap();
        let reloaded = storage
            .get_student_by_id_impl(student.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.class_id, None);
    }

    #[tokio::test]
    async fn test_upsert_student_reports_outcome() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let record = StudentImportRecord {
            admission_no: "ADM-100".to_string(),
            first_name: "Otieno".to_string(),
            last_name: "Odhiambo".to_string(),
            gender: Some(Gender::Male),
            date_of_birth: None,
            class_id: None,
            status: None,
        };

        assert_eq!(
            storage.upsert_student_impl(record.clone()).await.unwrap(),
            UpsertOutcome::Inserted
        );

        let mut changed = record;
        changed.first_name = "Otieno James".to_string();
        changed.gender = None;
        assert_eq!(
            storage.upsert_student_impl(changed).await.unwrap(),
            UpsertOutcome::Updated
        );

        let student = storage
            .get_student_by_admission_no_impl("ADM-100")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(student.first_name, "Otieno James");
        assert_eq!(student.gender, Some(Gender::Male));
    }
}
