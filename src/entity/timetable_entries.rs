//! 课表条目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "timetable_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub template_id: i64,
    pub class_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub day_of_week: i32,
    pub slot: i32,
    pub room: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::timetable_templates::Entity",
        from = "Column::TemplateId",
        to = "super::timetable_templates::Column::Id"
    )]
    Template,
    #[sea_orm(
        belongs_to = "super::staff::Entity",
        from = "Column::TeacherId",
        to = "super::staff::Column::Id"
    )]
    Teacher,
}

impl Related<super::timetable_templates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Template.def()
    }
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_entry(self) -> crate::models::timetables::entities::TimetableEntry {
        crate::models::timetables::entities::TimetableEntry {
            id: self.id,
            template_id: self.template_id,
            class_id: self.class_id,
            subject_id: self.subject_id,
            teacher_id: self.teacher_id,
            day_of_week: self.day_of_week,
            slot: self.slot,
            room: self.room,
            created_at: super::timestamp_to_datetime(self.created_at),
            updated_at: super::timestamp_to_datetime(self.updated_at),
        }
    }
}
