use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::staff::requests::{CreateStaffRequest, StaffQueryParams, UpdateStaffRequest};
use crate::services::StaffService;
use crate::utils::SafeIDI64;

static STAFF_SERVICE: Lazy<StaffService> = Lazy::new(StaffService::new_lazy);

pub async fn list_staff(
    req: HttpRequest,
    query: web::Query<StaffQueryParams>,
) -> ActixResult<HttpResponse> {
    STAFF_SERVICE.list_staff(&req, query.into_inner()).await
}

pub async fn create_staff(
    req: HttpRequest,
    staff_data: web::Json<CreateStaffRequest>,
) -> ActixResult<HttpResponse> {
    STAFF_SERVICE
        .create_staff(&req, staff_data.into_inner())
        .await
}

pub async fn get_staff(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STAFF_SERVICE.get_staff(&req, id.0).await
}

pub async fn update_staff(
    req: HttpRequest,
    id: SafeIDI64,
    update_data: web::Json<UpdateStaffRequest>,
) -> ActixResult<HttpResponse> {
    STAFF_SERVICE
        .update_staff(&req, id.0, update_data.into_inner())
        .await
}

pub async fn delete_staff(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STAFF_SERVICE.delete_staff(&req, id.0).await
}

pub fn configure_staff_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/staff")
            .service(
                web::resource("")
                    .route(web::get().to(list_staff))
                    .route(web::post().to(create_staff)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_staff))
                    .route(web::put().to(update_staff))
                    .route(web::delete().to(delete_staff)),
            ),
    );
}
