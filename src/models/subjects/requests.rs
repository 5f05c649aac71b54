use serde::Deserialize;

// 创建科目请求
#[derive(Debug, Deserialize)]
pub struct CreateSubjectRequest {
    pub code: String,
    pub name: String,
}
