pub mod manage;
pub mod results;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::exams::entities::Exam;
use crate::models::exams::requests::{CreateExamRequest, ExamQueryParams, RecordResultsRequest};
use crate::services::{not_found, storage_error_response};
use crate::storage::Storage;

pub struct ExamService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn create_exam(
        &self,
        request: &HttpRequest,
        exam_data: CreateExamRequest,
    ) -> ActixResult<HttpResponse> {
        manage::create_exam(self, request, exam_data).await
    }

    pub async fn list_exams(
        &self,
        request: &HttpRequest,
        query: ExamQueryParams,
    ) -> ActixResult<HttpResponse> {
        manage::list_exams(self, request, query).await
    }

    pub async fn delete_exam(&self, request: &HttpRequest, exam_id: i64) -> ActixResult<HttpResponse> {
        manage::delete_exam(self, request, exam_id).await
    }

    // 批量录入成绩
    pub async fn record_results(
        &self,
        request: &HttpRequest,
        exam_id: i64,
        body: RecordResultsRequest,
    ) -> ActixResult<HttpResponse> {
        results::record_results(self, request, exam_id, body).await
    }

    // 成绩列表（含等级）
    pub async fn list_results(
        &self,
        request: &HttpRequest,
        exam_id: i64,
    ) -> ActixResult<HttpResponse> {
        results::list_results(self, request, exam_id).await
    }
}

pub(crate) async fn require_exam(
    storage: &Arc<dyn Storage>,
    exam_id: i64,
) -> Result<Exam, HttpResponse> {
    match storage.get_exam_by_id(exam_id).await {
        Ok(Some(exam)) => Ok(exam),
        Ok(None) => Err(not_found(ErrorCode::ExamNotFound, "Exam not found")),
        Err(e) => Err(storage_error_response(
            &e,
            ErrorCode::ExamNotFound,
            ErrorCode::Conflict,
        )),
    }
}
