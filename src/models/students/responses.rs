use super::entities::Student;
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 学生列表响应
#[derive(Debug, Serialize)]
pub struct StudentListResponse {
    pub items: Vec<Student>,
    pub pagination: PaginationInfo,
}
