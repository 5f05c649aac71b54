use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StaffService;
use crate::models::{
    ApiResponse, ErrorCode,
    staff::requests::{StaffListQuery, StaffQueryParams},
};
use crate::services::storage_error_response;

pub async fn list_staff(
    service: &StaffService,
    request: &HttpRequest,
    query: StaffQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = StaffListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        position: query.position,
        status: query.status,
        search: query.search,
    };

    match storage.list_staff_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Staff list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::StaffNotFound,
            ErrorCode::Conflict,
        )),
    }
}
