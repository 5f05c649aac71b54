use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::common::pagination::deserialize_optional_i64;

// 创建考试请求
#[derive(Debug, Deserialize)]
pub struct CreateExamRequest {
    pub name: String,
    pub term: String,
    pub class_id: i64,
    pub subject_id: i64,
    pub max_score: f64,
    pub exam_date: Option<NaiveDate>,
}

// 考试查询参数
#[derive(Debug, Default, Deserialize)]
pub struct ExamQueryParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub class_id: Option<i64>,
    pub term: Option<String>,
}

// 单条成绩
#[derive(Debug, Clone, Deserialize)]
pub struct ResultEntry {
    pub student_id: i64,
    pub score: f64,
    pub remark: Option<String>,
}

// 批量登记成绩
#[derive(Debug, Deserialize)]
pub struct RecordResultsRequest {
    pub results: Vec<ResultEntry>,
}
