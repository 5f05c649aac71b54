use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GuardianService;
use crate::models::{
    ApiResponse, ErrorCode,
    guardians::requests::{GuardianListQuery, GuardianQueryParams},
};
use crate::services::storage_error_response;

pub async fn list_guardians(
    service: &GuardianService,
    request: &HttpRequest,
    query: GuardianQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = GuardianListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        search: query.search,
    };

    match storage.list_guardians_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Guardian list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::GuardianNotFound,
            ErrorCode::Conflict,
        )),
    }
}
