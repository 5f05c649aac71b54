use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::ImportService;

static IMPORT_SERVICE: Lazy<ImportService> = Lazy::new(ImportService::new_lazy);

// multipart：file（CSV）与可选的 mapping（JSON）
pub async fn import_entity(
    req: HttpRequest,
    entity: web::Path<String>,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    IMPORT_SERVICE.import(&req, &entity, payload).await
}

pub fn configure_imports_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/imports").route("/{entity}", web::post().to(import_entity)),
    );
}
