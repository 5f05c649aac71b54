use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TimetableService;
use crate::models::timetables::requests::{
    CreateTemplateRequest, EntryQueryParams, UpdateTemplateRequest,
};
use crate::models::timetables::responses::{TemplateDetailResponse, TemplateListResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error_response, validation_error};
use crate::utils::validate::non_empty;

fn template_error(e: &crate::errors::SchoolError) -> HttpResponse {
    storage_error_response(
        e,
        ErrorCode::TimetableTemplateNotFound,
        ErrorCode::TimetableTemplateAlreadyExists,
    )
}

pub async fn create_template(
    service: &TimetableService,
    request: &HttpRequest,
    mut template_data: CreateTemplateRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(name) = non_empty(&template_data.name).map(str::to_string) else {
        return Ok(validation_error("Template name is required"));
    };
    template_data.name = name;

    match storage.create_template(template_data).await {
        Ok(template) => {
            info!("Timetable template {} created", template.name);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                template,
                "Timetable template created successfully",
            )))
        }
        Err(e) => Ok(template_error(&e)),
    }
}

pub async fn list_templates(
    service: &TimetableService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_templates().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TemplateListResponse { items },
            "Timetable templates retrieved successfully",
        ))),
        Err(e) => Ok(template_error(&e)),
    }
}

pub async fn get_template(
    service: &TimetableService,
    request: &HttpRequest,
    template_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let template = match storage.get_template_by_id(template_id).await {
        Ok(Some(template)) => template,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::TimetableTemplateNotFound,
                "Timetable template not found",
            ));
        }
        Err(e) => return Ok(template_error(&e)),
    };

    match storage
        .list_entries(template_id, EntryQueryParams::default())
        .await
    {
        Ok(entries) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TemplateDetailResponse { template, entries },
            "Timetable template retrieved successfully",
        ))),
        Err(e) => Ok(template_error(&e)),
    }
}

pub async fn update_template(
    service: &TimetableService,
    request: &HttpRequest,
    template_id: i64,
    update_data: UpdateTemplateRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if update_data
        .name
        .as_deref()
        .is_some_and(|name| name.trim().is_empty())
    {
        return Ok(validation_error("Template name cannot be empty"));
    }

    match storage.update_template(template_id, update_data).await {
        Ok(Some(template)) => {
            info!(
                "Timetable template {} updated (active: {})",
                template.id, template.is_active
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                template,
                "Timetable template updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(
            ErrorCode::TimetableTemplateNotFound,
            "Timetable template not found",
        )),
        Err(e) => Ok(template_error(&e)),
    }
}

pub async fn delete_template(
    service: &TimetableService,
    request: &HttpRequest,
    template_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_template(template_id).await {
        Ok(true) => {
            info!("Timetable template {} deleted", template_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Timetable template deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(
            ErrorCode::TimetableTemplateNotFound,
            "Timetable template not found",
        )),
        Err(e) => Ok(template_error(&e)),
    }
}
