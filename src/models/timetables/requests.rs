use serde::Deserialize;

// 创建课表模板
#[derive(Debug, Deserialize)]
pub struct CreateTemplateRequest {
    pub name: String,
    pub term: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

// 更新课表模板
#[derive(Debug, Deserialize)]
pub struct UpdateTemplateRequest {
    pub name: Option<String>,
    pub term: Option<String>,
    pub is_active: Option<bool>,
}

// 创建课表条目
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEntryRequest {
    pub class_id: i64,
    pub subject_id: i64,
    pub teacher_id: i64,
    pub day_of_week: i32,
    pub slot: i32,
    pub room: Option<String>,
    // 忽略冲突强制保存
    #[serde(default)]
    pub force: bool,
}

// 更新课表条目（未提供的字段保持不变）
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEntryRequest {
    pub class_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub day_of_week: Option<i32>,
    pub slot: Option<i32>,
    pub room: Option<String>,
    #[serde(default)]
    pub force: bool,
}

// 课表条目筛选
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryQueryParams {
    pub class_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub day_of_week: Option<i32>,
}

// 冲突检测请求
#[derive(Debug, Clone, Deserialize)]
pub struct ConflictCheckRequest {
    pub day_of_week: i32,
    pub slot: i32,
    pub teacher_id: i64,
    pub class_id: i64,
    pub room: Option<String>,
    // 更新已有条目时排除其自身
    pub exclude_entry_id: Option<i64>,
}
