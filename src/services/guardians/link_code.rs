use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{debug, info, warn};

use super::GuardianService;
use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::guardians::link_code::{
    LinkCodeGrant, cache_key, effective_ttl, normalize_code,
};
use crate::models::guardians::requests::RedeemLinkCodeRequest;
use crate::models::guardians::responses::LinkCodeResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::students::require_student;
use crate::services::{not_found, storage_error_response};
use crate::utils::random_code::generate_random_code;

const MAX_CODE_ATTEMPTS: usize = 5;

/// 取一个当前未被占用的绑定码，连续冲突时放弃
async fn allocate_code(
    cache: &dyn ObjectCache,
    mut next_code: impl FnMut() -> String,
) -> Option<String> {
    for _ in 0..MAX_CODE_ATTEMPTS {
        let code = next_code();
        match cache.get_raw(&cache_key(&code)).await {
            CacheResult::NotFound => return Some(code),
            // 后端读取失败时同样无法确认空闲
            _ => debug!("Link code already taken, regenerating"),
        }
    }
    None
}

pub async fn generate_link_code(
    service: &GuardianService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);
    let settings = &AppConfig::get().guardian_link;

    if let Err(resp) = require_student(&storage, student_id).await {
        return Ok(resp);
    }

    let Some(code) = allocate_code(cache.as_ref(), || {
        generate_random_code(settings.code_length)
    })
    .await
    else {
        warn!("No free link code for student {}", student_id);
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::Conflict,
            "Could not allocate a unique link code, please retry",
        )));
    };

    let now = chrono::Utc::now();
    let ttl = effective_ttl(settings.ttl_secs);
    let grant = LinkCodeGrant::new(student_id, now.timestamp(), ttl);

    if let Err(e) = cache.insert(cache_key(&code), &grant, ttl).await
    {
        return Ok(storage_error_response(
            &e,
            ErrorCode::LinkCodeInvalid,
            ErrorCode::Conflict,
        ));
    }

    info!("Link code issued for student {}", student_id);
    let expires_at = chrono::DateTime::from_timestamp(grant.expires_at, 0).unwrap_or(now);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        LinkCodeResponse {
            code,
            student_id,
            expires_at,
        },
        "Link code generated successfully",
    )))
}

pub async fn redeem_link_code(
    service: &GuardianService,
    request: &HttpRequest,
    guardian_id: i64,
    body: RedeemLinkCodeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    match storage.get_guardian_by_id(guardian_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::GuardianNotFound, "Guardian not found")),
        Err(e) => {
            return Ok(storage_error_response(
                &e,
                ErrorCode::GuardianNotFound,
                ErrorCode::Conflict,
            ));
        }
    }

    let invalid = || {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::LinkCodeInvalid,
            "Link code is invalid or has expired",
        ))
    };

    if normalize_code(&body.code).is_empty() {
        return Ok(invalid());
    }

    let key = cache_key(&body.code);
    let grant = match cache.get::<LinkCodeGrant>(&key).await {
        CacheResult::Found(grant) => grant,
        _ => return Ok(invalid()),
    };

    // 单次有效：无论是否过期都先移除
    cache.remove(&key).await;
    if grant.is_expired(chrono::Utc::now().timestamp()) {
        warn!("Expired link code presented by guardian {}", guardian_id);
        return Ok(invalid());
    }

    match storage.link_guardian(grant.student_id, guardian_id).await {
        Ok(link) => {
            info!(
                "Guardian {} linked to student {} via link code",
                guardian_id, grant.student_id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(link, "Guardian linked successfully")))
        }
        Err(e) => Ok(storage_error_response(
            &e,
            ErrorCode::StudentNotFound,
            ErrorCode::Conflict,
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;

    fn codes(list: &[&str]) -> impl FnMut() -> String {
        let mut list = list.iter().map(|c| c.to_string()).collect::<Vec<_>>().into_iter();
        move || list.next().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_live_code_is_never_reissued() {
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(100, 60));
        let pending = LinkCodeGrant::new(1, chrono::Utc::now().timestamp(), 900);
        cache
            .insert(cache_key("AAAA1111"), &pending, 900)
            .await
            .unwrap();

        let code = allocate_code(cache.as_ref(), codes(&["aaaa1111", "BBBB2222"])).await;
        assert_eq!(code.as_deref(), Some("BBBB2222"));

        // 原学生的绑定码保持不变
        match cache.get::<LinkCodeGrant>(&cache_key("AAAA1111")).await {
            CacheResult::Found(grant) => assert_eq!(grant, pending),
            _ => panic!("pending code was lost"),
        }
    }

    #[tokio::test]
    async fn test_gives_up_after_repeated_collisions() {
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(100, 60));
        let pending = LinkCodeGrant::new(1, chrono::Utc::now().timestamp(), 900);
        cache
            .insert(cache_key("CCCC3333"), &pending, 900)
            .await
            .unwrap();

        let same = ["CCCC3333"; MAX_CODE_ATTEMPTS];
        assert_eq!(allocate_code(cache.as_ref(), codes(&same)).await, None);
    }
}
