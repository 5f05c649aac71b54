use super::entities::Staff;
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 教职工列表响应
#[derive(Debug, Serialize)]
pub struct StaffListResponse {
    pub items: Vec<Staff>,
    pub pagination: PaginationInfo,
}
