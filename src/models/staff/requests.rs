use super::entities::{StaffPosition, StaffStatus};
use crate::models::common::PaginationQuery;
use serde::Deserialize;

// 教职工查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct StaffQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub position: Option<StaffPosition>,
    pub status: Option<StaffStatus>,
    pub search: Option<String>,
}

// 创建教职工请求
#[derive(Debug, Deserialize)]
pub struct CreateStaffRequest {
    pub staff_no: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    // 不填写默认为 teacher
    pub position: Option<StaffPosition>,
}

// 更新教职工请求
#[derive(Debug, Deserialize)]
pub struct UpdateStaffRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<StaffPosition>,
    pub status: Option<StaffStatus>,
}

// 教职工列表查询参数（用于存储层）
#[derive(Debug, Clone)]
pub struct StaffListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub position: Option<StaffPosition>,
    pub status: Option<StaffStatus>,
    pub search: Option<String>,
}
