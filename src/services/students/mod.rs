pub mod create;
pub mod delete;
pub mod get;
pub mod guardians;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::students::requests::{
    CreateStudentRequest, StudentQueryParams, UpdateStudentRequest,
};
use crate::services::{not_found, storage_error_response};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
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

    pub async fn list_students(
        &self,
        request: &HttpRequest,
        query: StudentQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, request, query).await
    }

    pub async fn create_student(
        &self,
        request: &HttpRequest,
        student_data: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, request, student_data).await
    }

    pub async fn get_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_student(self, request, student_id).await
    }

    pub async fn update_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
        update_data: UpdateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, request, student_id, update_data).await
    }

    pub async fn delete_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, request, student_id).await
    }

    // 学生名下的监护人
    pub async fn list_student_guardians(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        guardians::list_student_guardians(self, request, student_id).await
    }
}

/// 指定的班级必须存在
pub(crate) async fn check_class_exists(
    storage: &Arc<dyn Storage>,
    class_id: Option<i64>,
) -> Result<(), HttpResponse> {
    let Some(class_id) = class_id else {
        return Ok(());
    };
    match storage.get_class_by_id(class_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(not_found(
            ErrorCode::ClassNotFound,
            format!("Class {class_id} not found"),
        )),
        Err(e) => Err(storage_error_response(
            &e,
            ErrorCode::ClassNotFound,
            ErrorCode::Conflict,
        )),
    }
}

/// 学生必须存在，其他模块复用
pub(crate) async fn require_student(
    storage: &Arc<dyn Storage>,
    student_id: i64,
) -> Result<crate::models::students::entities::Student, HttpResponse> {
    match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => Ok(student),
        Ok(None) => Err(not_found(
            ErrorCode::StudentNotFound,
            format!("Student {student_id} not found"),
        )),
        Err(e) => Err(storage_error_response(
            &e,
            ErrorCode::StudentNotFound,
            ErrorCode::Conflict,
        )),
    }
}
