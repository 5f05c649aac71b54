use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// 考试
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    pub id: i64,
    pub name: String,
    pub term: String,
    pub class_id: i64,
    pub subject_id: i64,
    pub max_score: f64,
    pub exam_date: Option<NaiveDate>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 考试成绩
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamResult {
    pub id: i64,
    pub exam_id: i64,
    pub student_id: i64,
    pub score: f64,
    pub remark: Option<String>,
    pub recorded_at: chrono::DateTime<chrono::Utc>,
}

/// 按得分率换算等级
pub fn letter_grade(score: f64, max_score: f64) -> &'static str {
    if max_score <= 0.0 {
        return "E";
    }
    let percent = score / max_score * 100.0;
    match percent {
        p if p >= 80.0 => "A",
        p if p >= 70.0 => "B",
        p if p >= 60.0 => "C",
        p if p >= 50.0 => "D",
        _ => "E",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_grade_boundaries() {
        assert_eq!(letter_grade(80.0, 100.0), "A");
        assert_eq!(letter_grade(79.9, 100.0), "B");
        assert_eq!(letter_grade(70.0, 100.0), "B");
        assert_eq!(letter_grade(60.0, 100.0), "C");
        assert_eq!(letter_grade(25.0, 50.0), "D");
        assert_eq!(letter_grade(49.0, 100.0), "E");
        assert_eq!(letter_grade(0.0, 0.0), "E");
    }
}
