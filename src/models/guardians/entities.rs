use serde::{Deserialize, Serialize};

// 监护人实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guardian {
    pub id: i64,
    pub full_name: String,
    // 手机号，唯一
    pub phone: String,
    pub email: Option<String>,
    // 与学生关系，如 father / mother / uncle
    pub relationship: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 学生与监护人的绑定关系
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentGuardianLink {
    pub id: i64,
    pub student_id: i64,
    pub guardian_id: i64,
    pub is_primary: bool,
    pub linked_at: chrono::DateTime<chrono::Utc>,
}
