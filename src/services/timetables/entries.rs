use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::TimetableService;
use super::conflicts::{conflict_response, find_conflicts, require_template};
use crate::models::timetables::conflicts::{SlotCandidate, validate_slot};
use crate::models::timetables::requests::{
    CreateEntryRequest, EntryQueryParams, UpdateEntryRequest,
};
use crate::models::timetables::responses::EntryListResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error_response, validation_error};
use crate::storage::Storage;

fn entry_error(e: &crate::errors::SchoolError) -> HttpResponse {
    storage_error_response(
        e,
        ErrorCode::TimetableEntryNotFound,
        ErrorCode::TimetableConflict,
    )
}

/// 校验条目引用的班级、科目、教师均存在
async fn check_references(
    storage: &Arc<dyn Storage>,
    class_id: Option<i64>,
    subject_id: Option<i64>,
    teacher_id: Option<i64>,
) -> Result<(), HttpResponse> {
    if let Some(id) = class_id {
        match storage.get_class_by_id(id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Err(not_found(
                    ErrorCode::ClassNotFound,
                    format!("Class {id} not found"),
                ));
            }
            Err(e) => return Err(entry_error(&e)),
        }
    }
    if let Some(id) = subject_id {
        match storage.get_subject_by_id(id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Err(not_found(
                    ErrorCode::SubjectNotFound,
                    format!("Subject {id} not found"),
                ));
            }
            Err(e) => return Err(entry_error(&e)),
        }
    }
    if let Some(id) = teacher_id {
        match storage.get_staff_by_id(id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Err(not_found(
                    ErrorCode::StaffNotFound,
                    format!("Teacher {id} not found"),
                ));
            }
            Err(e) => return Err(entry_error(&e)),
        }
    }
    Ok(())
}

pub async fn create_entry(
    service: &TimetableService,
    request: &HttpRequest,
    template_id: i64,
    entry_data: CreateEntryRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(msg) = validate_slot(entry_data.day_of_week, entry_data.slot) {
        return Ok(validation_error(msg));
    }
    if let Err(resp) = require_template(&storage, template_id).await {
        return Ok(resp);
    }
    if let Err(resp) = check_references(
        &storage,
        Some(entry_data.class_id),
        Some(entry_data.subject_id),
        Some(entry_data.teacher_id),
    )
    .await
    {
        return Ok(resp);
    }

    let candidate = SlotCandidate {
        day_of_week: entry_data.day_of_week,
        slot: entry_data.slot,
        teacher_id: entry_data.teacher_id,
        class_id: entry_data.class_id,
        room: entry_data.room.clone(),
        exclude_entry_id: None,
    };
    let conflicts = match find_conflicts(&storage, template_id, &candidate).await {
        Ok(conflicts) => conflicts,
        Err(resp) => return Ok(resp),
    };
    if !conflicts.is_empty() {
        if !entry_data.force {
            return Ok(conflict_response(conflicts));
        }
        warn!(
            "Saving timetable entry in template {} despite {} conflict(s)",
            template_id,
            conflicts.len()
        );
    }

    match storage.create_entry(template_id, entry_data).await {
        Ok(entry) => {
            info!(
                "Timetable entry {} created in template {}",
                entry.id, template_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                entry,
                "Timetable entry created successfully",
            )))
        }
        Err(e) => Ok(entry_error(&e)),
    }
}

pub async fn update_entry(
    service: &TimetableService,
    request: &HttpRequest,
    entry_id: i64,
    update_data: UpdateEntryRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let existing = match storage.get_entry_by_id(entry_id).await {
        Ok(Some(entry)) => entry,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::TimetableEntryNotFound,
                "Timetable entry not found",
            ));
        }
        Err(e) => return Ok(entry_error(&e)),
    };

    // 合并后的最终位置
    let candidate = SlotCandidate {
        day_of_week: update_data.day_of_week.unwrap_or(existing.day_of_week),
        slot: update_data.slot.unwrap_or(existing.slot),
        teacher_id: update_data.teacher_id.unwrap_or(existing.teacher_id),
        class_id: update_data.class_id.unwrap_or(existing.class_id),
        room: update_data.room.clone().or(existing.room.clone()),
        exclude_entry_id: Some(existing.id),
    };

    if let Err(msg) = validate_slot(candidate.day_of_week, candidate.slot) {
        return Ok(validation_error(msg));
    }
    if let Err(resp) = check_references(
        &storage,
        update_data.class_id,
        update_data.subject_id,
        update_data.teacher_id,
    )
    .await
    {
        return Ok(resp);
    }

    let conflicts = match find_conflicts(&storage, existing.template_id, &candidate).await {
        Ok(conflicts) => conflicts,
        Err(resp) => return Ok(resp),
    };
    if !conflicts.is_empty() {
        if !update_data.force {
            return Ok(conflict_response(conflicts));
        }
        warn!(
            "Updating timetable entry {} despite {} conflict(s)",
            entry_id,
            conflicts.len()
        );
    }

    match storage.update_entry(entry_id, update_data).await {
        Ok(Some(entry)) => {
            info!("Timetable entry {} updated", entry.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                entry,
                "Timetable entry updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(
            ErrorCode::TimetableEntryNotFound,
            "Timetable entry not found",
        )),
        Err(e) => Ok(entry_error(&e)),
    }
}

pub async fn delete_entry(
    service: &TimetableService,
    request: &HttpRequest,
    entry_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_entry(entry_id).await {
        Ok(true) => {
            info!("Timetable entry {} deleted", entry_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Timetable entry deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(
            ErrorCode::TimetableEntryNotFound,
            "Timetable entry not found",
        )),
        Err(e) => Ok(entry_error(&e)),
    }
}

pub async fn list_entries(
    service: &TimetableService,
    request: &HttpRequest,
    template_id: i64,
    filter: EntryQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = require_template(&storage, template_id).await {
        return Ok(resp);
    }

    match storage.list_entries(template_id, filter).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            EntryListResponse { items },
            "Timetable entries retrieved successfully",
        ))),
        Err(e) => Ok(entry_error(&e)),
    }
}
