use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

crate::string_enum! {
    // 学籍状态
    pub enum StudentStatus {
        Active => "active",
        Graduated => "graduated",
        Withdrawn => "withdrawn",
    }
}

crate::string_enum! {
    pub enum Gender {
        Male => "male",
        Female => "female",
        Other => "other",
    }
}

// 学生实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    // 学号，唯一
    pub admission_no: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub class_id: Option<i64>,
    pub status: StudentStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
