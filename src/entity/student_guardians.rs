//! 学生-监护人关联实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_guardians")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub guardian_id: i64,
    pub is_primary: bool,
    pub linked_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::guardians::Entity",
        from = "Column::GuardianId",
        to = "super::guardians::Column::Id"
    )]
    Guardian,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::guardians::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Guardian.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_link(self) -> crate::models::guardians::entities::StudentGuardianLink {
        crate::models::guardians::entities::StudentGuardianLink {
            id: self.id,
            student_id: self.student_id,
            guardian_id: self.guardian_id,
            is_primary: self.is_primary,
            linked_at: super::timestamp_to_datetime(self.linked_at),
        }
    }
}
