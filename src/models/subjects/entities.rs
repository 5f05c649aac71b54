use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    // 科目代码，唯一
    pub code: String,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
