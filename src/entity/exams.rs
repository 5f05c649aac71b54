//! 考试实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub term: String,
    pub class_id: i64,
    pub subject_id: i64,
    pub max_score: f64,
    pub exam_date: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::exam_results::Entity")]
    Results,
}

impl Related<super::exam_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Results.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_exam(self) -> crate::models::exams::entities::Exam {
        crate::models::exams::entities::Exam {
            id: self.id,
            name: self.name,
            term: self.term,
            class_id: self.class_id,
            subject_id: self.subject_id,
            max_score: self.max_score,
            exam_date: super::parse_stored_date(self.exam_date.as_deref()),
            created_at: super::timestamp_to_datetime(self.created_at),
        }
    }
}
