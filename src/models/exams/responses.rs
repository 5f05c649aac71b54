use serde::Serialize;

use super::entities::{Exam, ExamResult};

#[derive(Debug, Serialize)]
pub struct ExamListResponse {
    pub items: Vec<Exam>,
}

// 被跳过的成绩
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRejection {
    pub student_id: i64,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct RecordResultsResponse {
    pub recorded: usize,
    pub errors: Vec<ResultRejection>,
}

// 带等级的成绩
#[derive(Debug, Serialize)]
pub struct GradedResult {
    #[serde(flatten)]
    pub result: ExamResult,
    pub grade: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ExamResultsResponse {
    pub exam: Exam,
    pub items: Vec<GradedResult>,
}
