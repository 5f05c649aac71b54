use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::exams::requests::{CreateExamRequest, ExamQueryParams, RecordResultsRequest};
use crate::services::ExamService;
use crate::utils::SafeExamIdI64;

static EXAM_SERVICE: Lazy<ExamService> = Lazy::new(ExamService::new_lazy);

pub async fn list_exams(
    req: HttpRequest,
    query: web::Query<ExamQueryParams>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_exams(&req, query.into_inner()).await
}

pub async fn create_exam(
    req: HttpRequest,
    exam_data: web::Json<CreateExamRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.create_exam(&req, exam_data.into_inner()).await
}

pub async fn delete_exam(req: HttpRequest, exam_id: SafeExamIdI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.delete_exam(&req, exam_id.0).await
}

pub async fn list_results(req: HttpRequest, exam_id: SafeExamIdI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_results(&req, exam_id.0).await
}

pub async fn record_results(
    req: HttpRequest,
    exam_id: SafeExamIdI64,
    body: web::Json<RecordResultsRequest>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .record_results(&req, exam_id.0, body.into_inner())
        .await
}

pub fn configure_exams_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/exams")
            .service(
                web::resource("")
                    .route(web::get().to(list_exams))
                    .route(web::post().to(create_exam)),
            )
            .route("/{exam_id}", web::delete().to(delete_exam))
            .service(
                web::resource("/{exam_id}/results")
                    .route(web::get().to(list_results))
                    .route(web::post().to(record_results)),
            ),
    );
}
