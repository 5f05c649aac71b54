pub mod mark;
pub mod query;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::{
    ClassAttendanceQuery, MarkAttendanceRequest, StudentAttendanceQuery,
};
use crate::storage::Storage;

pub struct AttendanceService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceService {
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

    // 批量登记
    pub async fn mark_attendance(
        &self,
        request: &HttpRequest,
        body: MarkAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        mark::mark_attendance(self, request, body).await
    }

    pub async fn list_class_attendance(
        &self,
        request: &HttpRequest,
        class_id: i64,
        query: ClassAttendanceQuery,
    ) -> ActixResult<HttpResponse> {
        query::list_class_attendance(self, request, class_id, query).await
    }

    pub async fn student_summary(
        &self,
        request: &HttpRequest,
        student_id: i64,
        query: StudentAttendanceQuery,
    ) -> ActixResult<HttpResponse> {
        query::student_summary(self, request, student_id, query).await
    }
}
