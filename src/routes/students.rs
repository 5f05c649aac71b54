use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::students::requests::{
    CreateStudentRequest, StudentQueryParams, UpdateStudentRequest,
};
use crate::services::{GuardianService, InvoiceService, StudentService};
use crate::utils::{SafeGuardianIdI64, SafeStudentIdI64};

static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);
static GUARDIAN_SERVICE: Lazy<GuardianService> = Lazy::new(GuardianService::new_lazy);
static INVOICE_SERVICE: Lazy<InvoiceService> = Lazy::new(InvoiceService::new_lazy);

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<StudentQueryParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(&req, query.into_inner()).await
}

pub async fn create_student(
    req: HttpRequest,
    student_data: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .create_student(&req, student_data.into_inner())
        .await
}

pub async fn get_student(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_student(&req, student_id.0).await
}

pub async fn update_student(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    update_data: web::Json<UpdateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .update_student(&req, student_id.0, update_data.into_inner())
        .await
}

pub async fn delete_student(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_student(&req, student_id.0).await
}

pub async fn list_student_guardians(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .list_student_guardians(&req, student_id.0)
        .await
}

// 解除学生与监护人的关联
pub async fn unlink_guardian(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
    guardian_id: SafeGuardianIdI64,
) -> ActixResult<HttpResponse> {
    GUARDIAN_SERVICE
        .unlink_guardian(&req, student_id.0, guardian_id.0)
        .await
}

// 生成监护人绑定码
pub async fn generate_link_code(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    GUARDIAN_SERVICE.generate_link_code(&req, student_id.0).await
}

pub async fn student_statement(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    INVOICE_SERVICE.student_statement(&req, student_id.0).await
}

pub fn configure_students_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .service(
                web::resource("")
                    .route(web::get().to(list_students))
                    .route(web::post().to(create_student)),
            )
            .service(
                web::resource("/{student_id}")
                    .route(web::get().to(get_student))
                    .route(web::put().to(update_student))
                    .route(web::delete().to(delete_student)),
            )
            .route(
                "/{student_id}/guardians",
                web::get().to(list_student_guardians),
            )
            .route(
                "/{student_id}/guardians/{guardian_id}",
                web::delete().to(unlink_guardian),
            )
            .route("/{student_id}/link-codes", web::post().to(generate_link_code))
            .route("/{student_id}/statement", web::get().to(student_statement)),
    );
}
