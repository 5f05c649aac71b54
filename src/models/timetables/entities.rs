use serde::{Deserialize, Serialize};

// 课表模板（如某学期的总课表）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableTemplate {
    pub id: i64,
    pub name: String,
    pub term: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 课表条目：某班某节课由某教师在某教室上某科目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub id: i64,
    pub template_id: i64,
    pub class_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    // 1 = 周一 ... 7 = 周日
    pub day_of_week: i32,
    // 节次，从 1 开始
    pub slot: i32,
    pub room: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
