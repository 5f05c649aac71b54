//! 监护人实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "guardians")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub full_name: String,
    #[sea_orm(unique)]
    pub phone: String,
    pub email: Option<String>,
    pub relationship: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::student_guardians::Entity")]
    StudentGuardians,
}

impl Related<super::student_guardians::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentGuardians.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_guardian(self) -> crate::models::guardians::entities::Guardian {
        crate::models::guardians::entities::Guardian {
            id: self.id,
            full_name: self.full_name,
            phone: self.phone,
            email: self.email,
            relationship: self.relationship,
            created_at: super::timestamp_to_datetime(self.created_at),
            updated_at: super::timestamp_to_datetime(self.updated_at),
        }
    }
}
