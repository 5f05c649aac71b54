//! 教职工实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "staff")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub staff_no: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: String,
    pub status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::classes::Entity")]
    Classes,
    #[sea_orm(has_many = "super::timetable_entries::Entity")]
    TimetableEntries,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classes.def()
    }
}

impl Related<super::timetable_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimetableEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_staff(self) -> crate::models::staff::entities::Staff {
        use crate::models::staff::entities::{Staff, StaffPosition, StaffStatus};

        Staff {
            id: self.id,
            staff_no: self.staff_no,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            position: self
                .position
                .parse::<StaffPosition>()
                .unwrap_or(StaffPosition::Teacher),
            status: self
                .status
                .parse::<StaffStatus>()
                .unwrap_or(StaffStatus::Active),
            created_at: super::timestamp_to_datetime(self.created_at),
            updated_at: super::timestamp_to_datetime(self.updated_at),
        }
    }
}
