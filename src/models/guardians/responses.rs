use super::entities::{Guardian, StudentGuardianLink};
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 监护人列表响应
#[derive(Debug, Serialize)]
pub struct GuardianListResponse {
    pub items: Vec<Guardian>,
    pub pagination: PaginationInfo,
}

// 学生名下的监护人
#[derive(Debug, Serialize)]
pub struct LinkedGuardian {
    pub link: StudentGuardianLink,
    pub guardian: Guardian,
}

// 生成的绑定码
#[derive(Debug, Serialize)]
pub struct LinkCodeResponse {
    pub code: String,
    pub student_id: i64,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}
