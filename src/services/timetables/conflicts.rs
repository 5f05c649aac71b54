use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TimetableService;
use crate::models::timetables::conflicts::{
    SlotCandidate, TimetableConflict, detect_conflicts, validate_slot,
};
use crate::models::timetables::requests::ConflictCheckRequest;
use crate::models::timetables::responses::ConflictCheckResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error_response, validation_error};
use crate::storage::Storage;

pub async fn check_conflicts(
    service: &TimetableService,
    request: &HttpRequest,
    template_id: i64,
    check: ConflictCheckRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(msg) = validate_slot(check.day_of_week, check.slot) {
        return Ok(validation_error(msg));
    }
    if let Err(resp) = require_template(&storage, template_id).await {
        return Ok(resp);
    }

    let candidate = SlotCandidate {
        day_of_week: check.day_of_week,
        slot: check.slot,
        teacher_id: check.teacher_id,
        class_id: check.class_id,
        room: check.room,
        exclude_entry_id: check.exclude_entry_id,
    };

    match find_conflicts(&storage, template_id, &candidate).await {
        Ok(conflicts) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ConflictCheckResponse::from(conflicts),
            "Conflict check completed",
        ))),
        Err(resp) => Ok(resp),
    }
}

/// 读取同一位置的已有条目并比对
pub(crate) async fn find_conflicts(
    storage: &Arc<dyn Storage>,
    template_id: i64,
    candidate: &SlotCandidate,
) -> Result<Vec<TimetableConflict>, HttpResponse> {
    let existing = storage
        .list_slot_entries(template_id, candidate.day_of_week, candidate.slot)
        .await
        .map_err(|e| {
            storage_error_response(
                &e,
                ErrorCode::TimetableEntryNotFound,
                ErrorCode::TimetableConflict,
            )
        })?;
    Ok(detect_conflicts(candidate, &existing))
}

pub(crate) fn conflict_response(conflicts: Vec<TimetableConflict>) -> HttpResponse {
    let message = format!(
        "Timetable entry conflicts with {} existing booking(s)",
        conflicts.len()
    );
    HttpResponse::Conflict().json(ApiResponse::error(
        ErrorCode::TimetableConflict,
        ConflictCheckResponse::from(conflicts),
        message,
    ))
}

pub(crate) async fn require_template(
    storage: &Arc<dyn Storage>,
    template_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_template_by_id(template_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(not_found(
            ErrorCode::TimetableTemplateNotFound,
            "Timetable template not found",
        )),
        Err(e) => Err(storage_error_response(
            &e,
            ErrorCode::TimetableTemplateNotFound,
            ErrorCode::Conflict,
        )),
    }
}
