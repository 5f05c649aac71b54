//! 数据模型定义
//!
//! 按资源划分：`entities` 为业务实体，`requests` 为请求体/查询参数，
//! `responses` 为响应结构。

pub mod common;

pub mod attendance;
pub mod classes;
pub mod exams;
pub mod guardians;
pub mod imports;
pub mod invoices;
pub mod staff;
pub mod students;
pub mod subjects;
pub mod system;
pub mod timetables;

pub use common::error_code::ErrorCode;
pub use common::pagination::{PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
