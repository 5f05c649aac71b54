use crate::models::common::PaginationQuery;
use serde::Deserialize;

// 监护人查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct GuardianQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 创建监护人请求
#[derive(Debug, Deserialize)]
pub struct CreateGuardianRequest {
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub relationship: Option<String>,
}

// 使用绑定码关联学生
#[derive(Debug, Deserialize)]
pub struct RedeemLinkCodeRequest {
    pub code: String,
}

// 监护人列表查询参数（用于存储层）
#[derive(Debug, Clone)]
pub struct GuardianListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
}
