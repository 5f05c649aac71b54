use chrono::NaiveDate;
use serde::Deserialize;

use super::entities::{Gender, StudentStatus};
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_i64;

// 学生查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct StudentQueryParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub class_id: Option<i64>,
    pub status: Option<StudentStatus>,
    pub search: Option<String>,
}

// 创建学生请求
#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    pub admission_no: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub class_id: Option<i64>,
    // 不填写默认为 active
    pub status: Option<StudentStatus>,
}

// 更新学生请求
#[derive(Debug, Deserialize)]
pub struct UpdateStudentRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub class_id: Option<i64>,
    pub status: Option<StudentStatus>,
}

// 学生列表查询参数（用于存储层）
#[derive(Debug, Clone)]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub class_id: Option<i64>,
    pub status: Option<StudentStatus>,
    pub search: Option<String>,
}
