use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::guardians::requests::{
    CreateGuardianRequest, GuardianQueryParams, RedeemLinkCodeRequest,
};
use crate::services::GuardianService;
use crate::utils::SafeGuardianIdI64;

static GUARDIAN_SERVICE: Lazy<GuardianService> = Lazy::new(GuardianService::new_lazy);

pub async fn list_guardians(
    req: HttpRequest,
    query: web::Query<GuardianQueryParams>,
) -> ActixResult<HttpResponse> {
    GUARDIAN_SERVICE
        .list_guardians(&req, query.into_inner())
        .await
}

pub async fn create_guardian(
    req: HttpRequest,
    guardian_data: web::Json<CreateGuardianRequest>,
) -> ActixResult<HttpResponse> {
    GUARDIAN_SERVICE
        .create_guardian(&req, guardian_data.into_inner())
        .await
}

pub async fn get_guardian(
    req: HttpRequest,
    guardian_id: SafeGuardianIdI64,
) -> ActixResult<HttpResponse> {
    GUARDIAN_SERVICE.get_guardian(&req, guardian_id.0).await
}

// 使用绑定码关联学生
pub async fn redeem_link_code(
    req: HttpRequest,
    guardian_id: SafeGuardianIdI64,
    body: web::Json<RedeemLinkCodeRequest>,
) -> ActixResult<HttpResponse> {
    GUARDIAN_SERVICE
        .redeem_link_code(&req, guardian_id.0, body.into_inner())
        .await
}

pub fn configure_guardians_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/guardians")
            .service(
                web::resource("")
                    .route(web::get().to(list_guardians))
                    .route(web::post().to(create_guardian)),
            )
            .route("/{guardian_id}", web::get().to(get_guardian))
            .route("/{guardian_id}/link", web::post().to(redeem_link_code)),
    );
}
