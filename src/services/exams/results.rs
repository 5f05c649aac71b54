use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{ExamService, require_exam};
use crate::models::exams::entities::letter_grade;
use crate::models::exams::requests::{RecordResultsRequest, ResultEntry};
use crate::models::exams::responses::{
    ExamResultsResponse, GradedResult, RecordResultsResponse, ResultRejection,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::storage_error_response;

/// 分数必须在 0..=max_score 之间
fn check_score(entry: &ResultEntry, max_score: f64) -> Result<(), String> {
    if !entry.score.is_finite() || entry.score < 0.0 || entry.score > max_score {
        return Err(format!(
            "Score {} is outside the range 0..={}",
            entry.score, max_score
        ));
    }
    Ok(())
}

pub async fn record_results(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
    body: RecordResultsRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let exam = match require_exam(&storage, exam_id).await {
        Ok(exam) => exam,
        Err(resp) => return Ok(resp),
    };
    if body.results.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ExamResultInvalid,
            "At least one result is required",
        )));
    }

    let mut recorded = 0;
    let mut errors = Vec::new();
    for entry in body.results {
        let student_id = entry.student_id;
        if let Err(message) = check_score(&entry, exam.max_score) {
            errors.push(ResultRejection {
                student_id,
                message,
            });
            continue;
        }
        match storage.upsert_exam_result(exam_id, entry).await {
            Ok(_) => recorded += 1,
            Err(e) if e.is_client_error() => errors.push(ResultRejection {
                student_id,
                message: e.message().to_string(),
            }),
            Err(e) => {
                return Ok(storage_error_response(
                    &e,
                    ErrorCode::ExamNotFound,
                    ErrorCode::Conflict,
                ));
            }
        }
    }

    if !errors.is_empty() {
        warn!(
            "Exam {}: {} result(s) rejected, {} recorded",
            exam_id,
            errors.len(),
            recorded
        );
    } else {
        info!("Exam {}: {} result(s) recorded", exam_id, recorded);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        RecordResultsResponse { recorded, errors },
        "Exam results processed",
    )))
}

pub async fn list_results(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let exam = match require_exam(&storage, exam_id).await {
        Ok(exam) => exam,
        Err(resp) => return Ok(resp),
    };

    match storage.list_exam_results(exam_id).await {
        Ok(results) => {
            let items = results
                .into_iter()
                .map(|result| GradedResult {
                    grade: letter_grade(result.score, exam.max_score),
                    result,
                })
                .collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                ExamResultsResponse { exam, items },
                "Exam results retrieved successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::ExamNotFound,
            ErrorCode::Conflict,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: f64) -> ResultEntry {
        ResultEntry {
            student_id: 1,
            score,
            remark: None,
        }
    }

    #[test]
    fn test_score_bounds_are_inclusive() {
        assert!(check_score(&entry(0.0), 50.0).is_ok());
        assert!(check_score(&entry(50.0), 50.0).is_ok());
        assert!(check_score(&entry(50.5), 50.0).is_err());
        assert!(check_score(&entry(-1.0), 50.0).is_err());
        assert!(check_score(&entry(f64::NAN), 50.0).is_err());
    }
}
