use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::SystemService;
use crate::cache::ObjectCache;
use crate::models::system::SystemInfo;
use crate::models::{ApiResponse, AppStartTime};
use crate::storage::Storage;

pub async fn get_info(service: &SystemService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    let now = chrono::Utc::now();

    let started_at = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|t| t.start_datetime)
        .unwrap_or(now);
    let database_backend = request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|s| s.backend_name())
        .unwrap_or("unknown");
    let cache_backend = request
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|c| c.backend_name())
        .unwrap_or("none");

    let response = SystemInfo {
        name: config.app.system_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: config.app.environment.clone(),
        started_at,
        uptime_seconds: (now - started_at).num_seconds().max(0),
        database_backend: database_backend.to_string(),
        cache_backend: cache_backend.to_string(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "System information retrieved successfully",
    )))
}
