pub mod conflicts;
pub mod entries;
pub mod templates;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::timetables::requests::{
    ConflictCheckRequest, CreateEntryRequest, CreateTemplateRequest, EntryQueryParams,
    UpdateEntryRequest, UpdateTemplateRequest,
};
use crate::storage::Storage;

pub struct TimetableService {
    storage: Option<Arc<dyn Storage>>,
}

impl TimetableService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 模板
    pub async fn create_template(
        &self,
        request: &HttpRequest,
        template_data: CreateTemplateRequest,
    ) -> ActixResult<HttpResponse> {
        templates::create_template(self, request, template_data).await
    }

    pub async fn list_templates(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        templates::list_templates(self, request).await
    }

    // 模板详情，附带全部条目
    pub async fn get_template(
        &self,
        request: &HttpRequest,
        template_id: i64,
    ) -> ActixResult<HttpResponse> {
        templates::get_template(self, request, template_id).await
    }

    pub async fn update_template(
        &self,
        request: &HttpRequest,
        template_id: i64,
        update_data: UpdateTemplateRequest,
    ) -> ActixResult<HttpResponse> {
        templates::update_template(self, request, template_id, update_data).await
    }

    pub async fn delete_template(
        &self,
        request: &HttpRequest,
        template_id: i64,
    ) -> ActixResult<HttpResponse> {
        templates::delete_template(self, request, template_id).await
    }

    // 条目
    pub async fn create_entry(
        &self,
        request: &HttpRequest,
        template_id: i64,
        entry_data: CreateEntryRequest,
    ) -> ActixResult<HttpResponse> {
        entries::create_entry(self, request, template_id, entry_data).await
    }

    pub async fn update_entry(
        &self,
        request: &HttpRequest,
        entry_id: i64,
        update_data: UpdateEntryRequest,
    ) -> ActixResult<HttpResponse> {
        entries::update_entry(self, request, entry_id, update_data).await
    }

    pub async fn delete_entry(
        &self,
        request: &HttpRequest,
        entry_id: i64,
    ) -> ActixResult<HttpResponse> {
        entries::delete_entry(self, request, entry_id).await
    }

    pub async fn list_entries(
        &self,
        request: &HttpRequest,
        template_id: i64,
        filter: EntryQueryParams,
    ) -> ActixResult<HttpResponse> {
        entries::list_entries(self, request, template_id, filter).await
    }

    // 冲突检测（不写入）
    pub async fn check_conflicts(
        &self,
        request: &HttpRequest,
        template_id: i64,
        check: ConflictCheckRequest,
    ) -> ActixResult<HttpResponse> {
        conflicts::check_conflicts(self, request, template_id, check).await
    }
}
