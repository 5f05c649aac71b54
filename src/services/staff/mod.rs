pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::staff::requests::{CreateStaffRequest, StaffQueryParams, UpdateStaffRequest};
use crate::storage::Storage;
use crate::utils::validate::{validate_email, validate_phone};

pub struct StaffService {
    storage: Option<Arc<dyn Storage>>,
}

impl StaffService {
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

    pub async fn list_staff(
        &self,
        request: &HttpRequest,
        query: StaffQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_staff(self, request, query).await
    }

    pub async fn create_staff(
        &self,
        request: &HttpRequest,
        staff_data: CreateStaffRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_staff(self, request, staff_data).await
    }

    pub async fn get_staff(&self, request: &HttpRequest, staff_id: i64) -> ActixResult<HttpResponse> {
        get::get_staff(self, request, staff_id).await
    }

    pub async fn update_staff(
        &self,
        request: &HttpRequest,
        staff_id: i64,
        update_data: UpdateStaffRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_staff(self, request, staff_id, update_data).await
    }

    pub async fn delete_staff(
        &self,
        request: &HttpRequest,
        staff_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_staff(self, request, staff_id).await
    }
}

/// 校验可选的联系方式
pub(crate) fn validate_contact(
    email: Option<&str>,
    phone: Option<&str>,
) -> Result<(), &'static str> {
    if let Some(email) = email {
        validate_email(email)?;
    }
    if let Some(phone) = phone {
        validate_phone(phone)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_contact() {
        assert!(validate_contact(None, None).is_ok());
        assert!(validate_contact(Some("head@school.ac.ke"), Some("+254 700 123456")).is_ok());
        assert!(validate_contact(Some("not-an-email"), None).is_err());
        assert!(validate_contact(None, Some("12")).is_err());
    }
}
