//! 班级存储操作

use super::{SeaOrmStorage, search_pattern};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginationInfo, PaginationQuery,
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            grade_level: Set(req.grade_level),
            class_teacher_id: Set(req.class_teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;

        Ok(result.into_class())
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 通过名称获取班级
    pub async fn get_class_by_name_impl(&self, name: &str) -> Result<Option<Class>> {
        let result = Classes::find()
            .filter(Column::Name.eq(name.trim()))
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 分页列出班级
    pub async fn list_classes_with_pagination_impl(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);

        let mut select = Classes::find();

        // 搜索条件
        if let Some(pattern) = search_pattern(query.search.as_deref()) {
            select = select.filter(Column::Name.contains(&pattern));
        }

        select = select.order_by_asc(Column::Name);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级页数失败: {e}")))?;

        let classes = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(ClassListResponse {
            items: classes.into_iter().map(|m| m.into_class()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新班级信息
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        // 先检查班级是否存在
        let existing = self.get_class_by_id_impl(class_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(class_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(grade_level) = update.grade_level {
            model.grade_level = Set(Some(grade_level));
        }

        if let Some(teacher_id) = update.class_teacher_id {
            model.class_teacher_id = Set(Some(teacher_id));
        }

        model.update(&self.db).await?;

        self.get_class_by_id_impl(class_id).await
    }

    /// 删除班级
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let result = Classes::delete_by_id(class_id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除班级失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_class(name: &str) -> CreateClassRequest {
        CreateClassRequest {
            name: name.to_string(),
            grade_level: Some(1),
            class_teacher_id: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_class_name_is_conflict() {
        let storage = SeaOrmStorage::new_in_memory().await;
        storage.create_class_impl(new_class("Form 1A")).await.unwrap();

        let err = storage
            .create_class_impl(new_class("Form 1A"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E010");
    }

    #[tokio::test]
    async fn test_search_and_update() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let class = storage.create_class_impl(new_class("Form 1A")).await.unwrap();
        storage.create_class_impl(new_class("Form 2B")).await.unwrap();

        let list = storage
            .list_classes_with_pagination_impl(ClassListQuery {
                page: None,
                size: None,
                search: Some("2b".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(list.pagination.total, 1);
        assert_eq!(list.items[0].name, "Form 2B");

        let updated = storage
            .update_class_impl(
                class.id,
                UpdateClassRequest {
                    name: None,
                    grade_level: Some(3),
                    class_teacher_id: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.grade_level, Some(3));
        assert_eq!(updated.name, "Form 1A");

        assert!(storage.delete_class_impl(class.id).await.unwrap());
        assert!(storage.get_class_by_id_impl(class.id).await.unwrap().is_none());
    }
}
