//! 课表存储操作

use super::SeaOrmStorage;
use crate::entity::timetable_entries::{
    ActiveModel as EntryActiveModel, Column as EntryColumn, Entity as TimetableEntries,
};
use crate::entity::timetable_templates::{
    ActiveModel as TemplateActiveModel, Column as TemplateColumn, Entity as TimetableTemplates,
};
use crate::errors::{Result, SchoolError};
use crate::models::timetables::{
    entities::{TimetableEntry, TimetableTemplate},
    requests::{
        CreateEntryRequest, CreateTemplateRequest, EntryQueryParams, UpdateEntryRequest,
        UpdateTemplateRequest,
    },
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

// 空白教室名按未指定处理
fn normalize_room(room: Option<String>) -> Option<String> {
    room.map(|r| r.trim().to_string()).filter(|r| !r.is_empty())
}

impl SeaOrmStorage {
    pub async fn create_template_impl(
        &self,
        req: CreateTemplateRequest,
    ) -> Result<TimetableTemplate> {
        let now = chrono::Utc::now().timestamp();

        let model = TemplateActiveModel {
            name: Set(req.name),
            term: Set(req.term),
            is_active: Set(req.is_active),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;
        Ok(result.into_template())
    }

    pub async fn get_template_by_id_impl(
        &self,
        template_id: i64,
    ) -> Result<Option<TimetableTemplate>> {
        let result = TimetableTemplates::find_by_id(template_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课表模板失败: {e}")))?;

        Ok(result.map(|m| m.into_template()))
    }

    pub async fn list_templates_impl(&self) -> Result<Vec<TimetableTemplate>> {
        let templates = TimetableTemplates::find()
            .order_by_desc(TemplateColumn::IsActive)
            .order_by_asc(TemplateColumn::Name)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课表模板列表失败: {e}")))?;

        Ok(templates.into_iter().map(|m| m.into_template()).collect())
    }

    pub async fn update_template_impl(
        &self,
        template_id: i64,
        update: UpdateTemplateRequest,
    ) -> Result<Option<TimetableTemplate>> {
        if self.get_template_by_id_impl(template_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = TemplateActiveModel {
            id: Set(template_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(term) = update.term {
            model.term = Set(Some(term));
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        model.update(&self.db).await?;

        self.get_template_by_id_impl(template_id).await
    }

    pub async fn delete_template_impl(&self, template_id: i64) -> Result<bool> {
        let result = TimetableTemplates::delete_by_id(template_id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除课表模板失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn create_entry_impl(
        &self,
        template_id: i64,
        req: CreateEntryRequest,
    ) -> Result<TimetableEntry> {
        let now = chrono::Utc::now().timestamp();

        let model = EntryActiveModel {
            template_id: Set(template_id),
            class_id: Set(req.class_id),
            subject_id: Set(req.subject_id),
            teacher_id: Set(req.teacher_id),
            day_of_week: Set(req.day_of_week),
            slot: Set(req.slot),
            room: Set(normalize_room(req.room)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;
        Ok(result.into_entry())
    }

    pub async fn get_entry_by_id_impl(&self, entry_id: i64) -> Result<Option<TimetableEntry>> {
        let result = TimetableEntries::find_by_id(entry_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课表条目失败: {e}")))?;

        Ok(result.map(|m| m.into_entry()))
    }

    pub async fn update_entry_impl(
        &self,
        entry_id: i64,
        update: UpdateEntryRequest,
    ) -> Result<Option<TimetableEntry>> {
        if self.get_entry_by_id_impl(entry_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = EntryActiveModel {
            id: Set(entry_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(class_id) = update.class_id {
            model.class_id = Set(class_id);
        }
        if let Some(subject_id) = update.subject_id {
            model.subject_id = Set(subject_id);
        }
        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(teacher_id);
        }
        if let Some(day_of_week) = update.day_of_week {
            model.day_of_week = Set(day_of_week);
        }
        if let Some(slot) = update.slot {
            model.slot = Set(slot);
        }
        // 传空字符串可清除教室
        if update.room.is_some() {
            model.room = Set(normalize_room(update.room));
        }

        model.update(&self.db).await?;

        self.get_entry_by_id_impl(entry_id).await
    }

    pub async fn delete_entry_impl(&self, entry_id: i64) -> Result<bool> {
        let result = TimetableEntries::delete_by_id(entry_id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除课表条目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_entries_impl(
        &self,
        template_id: i64,
        filter: EntryQueryParams,
    ) -> Result<Vec<TimetableEntry>> {
        let mut select =
            TimetableEntries::find().filter(EntryColumn::TemplateId.eq(template_id));

        if let Some(class_id) = filter.class_id {
            select = select.filter(EntryColumn::ClassId.eq(class_id));
        }
        if let Some(teacher_id) = filter.teacher_id {
            select = select.filter(EntryColumn::TeacherId.eq(teacher_id));
        }
        if let Some(day_of_week) = filter.day_of_week {
            select = select.filter(EntryColumn::DayOfWeek.eq(day_of_week));
        }

        let entries = select
            .order_by_asc(EntryColumn::DayOfWeek)
            .order_by_asc(EntryColumn::Slot)
            .order_by_asc(EntryColumn::ClassId)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课表条目失败: {e}")))?;

        Ok(entries.into_iter().map(|m| m.into_entry()).collect())
    }

    /// 冲突检测的候选集合
    pub async fn list_slot_entries_impl(
        &self,
        template_id: i64,
        day_of_week: i32,
        slot: i32,
    ) -> Result<Vec<TimetableEntry>> {
        let entries = TimetableEntries::find()
            .filter(EntryColumn::TemplateId.eq(template_id))
            .filter(EntryColumn::DayOfWeek.eq(day_of_week))
            .filter(EntryColumn::Slot.eq(slot))
            .order_by_asc(EntryColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课表节次失败: {e}")))?;

        Ok(entries.into_iter().map(|m| m.into_entry()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classes::requests::CreateClassRequest;
    use crate::models::staff::requests::CreateStaffRequest;
    use crate::models::subjects::requests::CreateSubjectRequest;
    use crate::models::timetables::conflicts::{ConflictKind, SlotCandidate, detect_conflicts};

    struct Fixture {
        storage: SeaOrmStorage,
        template_id: i64,
        class_a: i64,
        class_b: i64,
        subject_id: i64,
        teacher_a: i64,
        teacher_b: i64,
    }

    async fn fixture() -> Fixture {
        let storage = SeaOrmStorage::new_in_memory().await;
        let template_id = storage
            .create_template_impl(CreateTemplateRequest {
                name: "Term 1".to_string(),
                term: Some("2025-T1".to_string()),
                is_active: true,
            })
            .await
            .unwrap()
            .id;

        let mut classes = Vec::new();
        for name in ["7A", "7B"] {
            classes.push(
                storage
                    .create_class_impl(CreateClassRequest {
                        name: name.to_string(),
                        grade_level: Some(7),
                        class_teacher_id: None,
                    })
                    .await
                    .unwrap()
                    .id,
            );
        }

        let mut teachers = Vec::new();
        for no in ["T-01", "T-02"] {
            teachers.push(
                storage
                    .create_staff_impl(CreateStaffRequest {
                        staff_no: no.to_string(),
                        full_name: format!("Teacher {no}"),
                        email: None,
                        phone: None,
                        position: None,
                    })
                    .await
                    .unwrap()
                    .id,
            );
        }

        let subject_id = storage
            .create_subject_impl(CreateSubjectRequest {
                code: "MAT".to_string(),
                name: "Mathematics".to_string(),
            })
            .await
            .unwrap()
            .id;

        Fixture {
            storage,
            template_id,
            class_a: classes[0],
            class_b: classes[1],
            subject_id,
            teacher_a: teachers[0],
            teacher_b: teachers[1],
        }
    }

    #[tokio::test]
    async fn test_slot_query_feeds_conflict_detection() {
        let f = fixture().await;
        let existing = f
            .storage
            .create_entry_impl(
                f.template_id,
                CreateEntryRequest {
                    class_id: f.class_a,
                    subject_id: f.subject_id,
                    teacher_id: f.teacher_a,
                    day_of_week: 1,
                    slot: 2,
                    room: Some(" Lab 1 ".to_string()),
                    force: false,
                },
            )
            .await
            .unwrap();
        assert_eq!(existing.room.as_deref(), Some("Lab 1"));

        // 另一节次不应被取出
        f.storage
            .create_entry_impl(
                f.template_id,
                CreateEntryRequest {
                    class_id: f.class_a,
                    subject_id: f.subject_id,
                    teacher_id: f.teacher_a,
                    day_of_week: 1,
                    slot: 3,
                    room: None,
                    force: false,
                },
            )
            .await
            .unwrap();

        let slot_entries = f
            .storage
            .list_slot_entries_impl(f.template_id, 1, 2)
            .await
            .unwrap();
        assert_eq!(slot_entries.len(), 1);

        let candidate = SlotCandidate {
            day_of_week: 1,
            slot: 2,
            teacher_id: f.teacher_a,
            class_id: f.class_b,
            room: Some("lab 1".to_string()),
            exclude_entry_id: None,
        };
        let conflicts = detect_conflicts(&candidate, &slot_entries);
        let kinds: Vec<_> = conflicts.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            [ConflictKind::TeacherDoubleBooking, ConflictKind::RoomDoubleBooking]
        );

        let free = SlotCandidate {
            teacher_id: f.teacher_b,
            room: None,
            ..candidate
        };
        assert!(detect_conflicts(&free, &slot_entries).is_empty());
    }

    #[tokio::test]
    async fn test_deleting_template_cascades_entries() {
        let f = fixture().await;
        let entry = f
            .storage
            .create_entry_impl(
                f.template_id,
                CreateEntryRequest {
                    class_id: f.class_a,
                    subject_id: f.subject_id,
                    teacher_id: f.teacher_a,
                    day_of_week: 5,
                    slot: 1,
                    room: None,
                    force: false,
                },
            )
            .await
            .unwrap();

        assert!(f.storage.delete_template_impl(f.template_id).await.unwrap());
        assert!(f.storage.get_entry_by_id_impl(entry.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_entry_clears_room() {
        let f = fixture().await;
        let entry = f
            .storage
            .create_entry_impl(
                f.template_id,
                CreateEntryRequest {
                    class_id: f.class_a,
                    subject_id: f.subject_id,
                    teacher_id: f.teacher_a,
                    day_of_week: 2,
                    slot: 4,
                    room: Some("R12".to_string()),
                    force: false,
                },
            )
            .await
            .unwrap();

        let updated = f
            .storage
            .update_entry_impl(
                entry.id,
                UpdateEntryRequest {
                    class_id: None,
                    subject_id: None,
                    teacher_id: Some(f.teacher_b),
                    day_of_week: None,
                    slot: None,
                    room: Some("  ".to_string()),
                    force: false,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.teacher_id, f.teacher_b);
        assert_eq!(updated.room, None);

        let by_teacher = f
            .storage
            .list_entries_impl(
                f.template_id,
                EntryQueryParams {
                    teacher_id: Some(f.teacher_b),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(by_teacher.len(), 1);
    }
}
