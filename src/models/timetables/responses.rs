use super::conflicts::TimetableConflict;
use super::entities::{TimetableEntry, TimetableTemplate};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TemplateListResponse {
    pub items: Vec<TimetableTemplate>,
}

// 模板详情（含全部条目）
#[derive(Debug, Serialize)]
pub struct TemplateDetailResponse {
    pub template: TimetableTemplate,
    pub entries: Vec<TimetableEntry>,
}

#[derive(Debug, Serialize)]
pub struct EntryListResponse {
    pub items: Vec<TimetableEntry>,
}

#[derive(Debug, Serialize)]
pub struct ConflictCheckResponse {
    pub has_conflicts: bool,
    pub conflicts: Vec<TimetableConflict>,
}

impl From<Vec<TimetableConflict>> for ConflictCheckResponse {
    fn from(conflicts: Vec<TimetableConflict>) -> Self {
        Self {
            has_conflicts: !conflicts.is_empty(),
            conflicts,
        }
    }
}
