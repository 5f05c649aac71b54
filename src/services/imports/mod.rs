pub mod mapping;
pub mod process;
pub mod rows;

use std::collections::HashMap;
use std::sync::Arc;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::StreamExt;
use tracing::error;

use crate::config::AppConfig;
use crate::models::imports::entities::ImportEntity;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct ImportService {
    storage: Option<Arc<dyn Storage>>,
}

/// 上传内容：CSV 文件与可选的列映射
#[derive(Debug, Default)]
struct ImportUpload {
    file: Vec<u8>,
    mapping: Option<HashMap<String, String>>,
}

impl ImportService {
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

    // 批量导入
    pub async fn import(
        &self,
        request: &HttpRequest,
        entity: &str,
        mut payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        let Ok(entity) = entity.parse::<ImportEntity>() else {
            return Ok(bad_request(
                ErrorCode::ImportEntityUnsupported,
                format!(
                    "Unsupported import entity '{entity}', expected one of: {}",
                    ImportEntity::VALUES.join(", ")
                ),
            ));
        };

        let upload = match read_upload(&mut payload).await {
            Ok(upload) => upload,
            Err((code, message)) => return Ok(bad_request(code, message)),
        };

        let max_rows = AppConfig::get().import.max_rows;
        match process::run_import(
            &storage,
            entity,
            &upload.file,
            upload.mapping.as_ref(),
            max_rows,
        )
        .await
        {
            Ok(report) => {
                Ok(HttpResponse::Ok().json(ApiResponse::success(report, "Import completed")))
            }
            Err(failure) if failure.internal => {
                error!("Import of {} failed: {}", entity, failure.message);
                Ok(HttpResponse::InternalServerError()
                    .json(ApiResponse::error_empty(failure.code, failure.message)))
            }
            Err(failure) => Ok(bad_request(failure.code, failure.message)),
        }
    }
}

fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

async fn read_field(field: &mut actix_multipart::Field) -> Result<Vec<u8>, String> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(|e| format!("Failed to read upload: {e}"))?;
        bytes.extend_from_slice(&data);
    }
    Ok(bytes)
}

async fn read_upload(payload: &mut Multipart) -> Result<ImportUpload, (ErrorCode, String)> {
    let parse_failed = |msg: String| (ErrorCode::ImportFileParseFailed, msg);
    let mut upload = ImportUpload::default();
    let mut has_file = false;

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| parse_failed(format!("Failed to read form field: {e}")))?;

        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                upload.file = read_field(&mut field).await.map_err(parse_failed)?;
                has_file = true;
            }
            Some("mapping") => {
                let raw = read_field(&mut field).await.map_err(parse_failed)?;
                if raw.iter().all(u8::is_ascii_whitespace) {
                    continue;
                }
                let mapping: HashMap<String, String> =
                    serde_json::from_slice(&raw).map_err(|e| {
                        (
                            ErrorCode::ImportMappingInvalid,
                            format!("Mapping must be a JSON object of column to field: {e}"),
                        )
                    })?;
                upload.mapping = Some(mapping);
            }
            // 其他字段丢弃
            _ => {
                read_field(&mut field).await.map_err(parse_failed)?;
            }
        }
    }

    if !has_file || upload.file.is_empty() {
        return Err((
            ErrorCode::ImportFileDataInvalid,
            "A non-empty 'file' part is required".to_string(),
        ));
    }
    Ok(upload)
}
