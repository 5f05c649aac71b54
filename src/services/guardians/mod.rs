pub mod create;
pub mod get;
pub mod link_code;
pub mod list;
pub mod unlink;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::guardians::requests::{
    CreateGuardianRequest, GuardianQueryParams, RedeemLinkCodeRequest,
};
use crate::storage::Storage;

pub struct GuardianService {
    storage: Option<Arc<dyn Storage>>,
}

impl GuardianService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 绑定码存放在对象缓存中
    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Arc<dyn ObjectCache> {
        request
            .app_data::<web::Data<Arc<dyn ObjectCache>>>()
            .expect("Object cache not found in app data")
            .get_ref()
            .clone()
    }

    pub async fn create_guardian(
        &self,
        request: &HttpRequest,
        guardian_data: CreateGuardianRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_guardian(self, request, guardian_data).await
    }

    pub async fn get_guardian(
        &self,
        request: &HttpRequest,
        guardian_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_guardian(self, request, guardian_id).await
    }

    pub async fn list_guardians(
        &self,
        request: &HttpRequest,
        query: GuardianQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_guardians(self, request, query).await
    }

    // 为学生生成一次性绑定码
    pub async fn generate_link_code(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        link_code::generate_link_code(self, request, student_id).await
    }

    // 监护人使用绑定码关联学生
    pub async fn redeem_link_code(
        &self,
        request: &HttpRequest,
        guardian_id: i64,
        body: RedeemLinkCodeRequest,
    ) -> ActixResult<HttpResponse> {
        link_code::redeem_link_code(self, request, guardian_id, body).await
    }

    pub async fn unlink_guardian(
        &self,
        request: &HttpRequest,
        student_id: i64,
        guardian_id: i64,
    ) -> ActixResult<HttpResponse> {
        unlink::unlink_guardian(self, request, student_id, guardian_id).await
    }
}
