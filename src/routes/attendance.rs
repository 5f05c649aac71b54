use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::attendance::requests::{
    ClassAttendanceQuery, MarkAttendanceRequest, StudentAttendanceQuery,
};
use crate::services::AttendanceService;
use crate::utils::{SafeClassIdI64, SafeStudentIdI64};

static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn mark_attendance(
    req: HttpRequest,
    body: web::Json<MarkAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .mark_attendance(&req, body.into_inner())
        .await
}

pub async fn list_class_attendance(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    query: web::Query<ClassAttendanceQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_class_attendance(&req, class_id.0, query.into_inner())
        .await
}

pub async fn student_summary(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    query: web::Query<StudentAttendanceQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .student_summary(&req, student_id.0, query.into_inner())
        .await
}

pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/attendance")
            .route("", web::post().to(mark_attendance))
            .route("/classes/{class_id}", web::get().to(list_class_attendance))
            .route(
                "/students/{student_id}/summary",
                web::get().to(student_summary),
            ),
    );
}
