use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::timetables::requests::{
    ConflictCheckRequest, CreateEntryRequest, CreateTemplateRequest, EntryQueryParams,
    UpdateEntryRequest, UpdateTemplateRequest,
};
use crate::services::TimetableService;
use crate::utils::{SafeEntryIdI64, SafeTemplateIdI64};

static TIMETABLE_SERVICE: Lazy<TimetableService> = Lazy::new(TimetableService::new_lazy);

pub async fn list_templates(req: HttpRequest) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE.list_templates(&req).await
}

pub async fn create_template(
    req: HttpRequest,
    template_data: web::Json<CreateTemplateRequest>,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE
        .create_template(&req, template_data.into_inner())
        .await
}

pub async fn get_template(
    req: HttpRequest,
    template_id: SafeTemplateIdI64,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE.get_template(&req, template_id.0).await
}

pub async fn update_template(
    req: HttpRequest,
    template_id: SafeTemplateIdI64,
    update_data: web::Json<UpdateTemplateRequest>,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE
        .update_template(&req, template_id.0, update_data.into_inner())
        .await
}

pub async fn delete_template(
    req: HttpRequest,
    template_id: SafeTemplateIdI64,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE.delete_template(&req, template_id.0).await
}

pub async fn list_entries(
    req: HttpRequest,
    template_id: SafeTemplateIdI64,
    query: web::Query<EntryQueryParams>,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE
        .list_entries(&req, template_id.0, query.into_inner())
        .await
}

pub async fn create_entry(
    req: HttpRequest,
    template_id: SafeTemplateIdI64,
    entry_data: web::Json<CreateEntryRequest>,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE
        .create_entry(&req, template_id.0, entry_data.into_inner())
        .await
}

pub async fn update_entry(
    req: HttpRequest,
    entry_id: SafeEntryIdI64,
    update_data: web::Json<UpdateEntryRequest>,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE
        .update_entry(&req, entry_id.0, update_data.into_inner())
        .await
}

pub async fn delete_entry(req: HttpRequest, entry_id: SafeEntryIdI64) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE.delete_entry(&req, entry_id.0).await
}

pub async fn check_conflicts(
    req: HttpRequest,
    template_id: SafeTemplateIdI64,
    check: web::Json<ConflictCheckRequest>,
) -> ActixResult<HttpResponse> {
    TIMETABLE_SERVICE
        .check_conflicts(&req, template_id.0, check.into_inner())
        .await
}

pub fn configure_timetables_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/timetables")
            .service(
                web::resource("")
                    .route(web::get().to(list_templates))
                    .route(web::post().to(create_template)),
            )
            // 须在 /{template_id} 之前注册
            .service(
                web::resource("/entries/{entry_id}")
                    .route(web::put().to(update_entry))
                    .route(web::delete().to(delete_entry)),
            )
            .service(
                web::resource("/{template_id}")
                    .route(web::get().to(get_template))
                    .route(web::put().to(update_template))
                    .route(web::delete().to(delete_template)),
            )
            .service(
                web::resource("/{template_id}/entries")
                    .route(web::get().to(list_entries))
                    .route(web::post().to(create_entry)),
            )
            .route("/{template_id}/conflicts", web::post().to(check_conflicts)),
    );
}
