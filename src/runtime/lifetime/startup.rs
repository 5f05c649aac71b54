use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::errors::{Result, SchoolError};
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

const FALLBACK_CACHE: &str = "moka";

/// 按名称构造缓存插件
async fn build_cache(name: &str) -> Result<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(name).ok_or_else(|| {
        SchoolError::cache_plugin_not_found(format!("Cache backend '{name}' not found in registry"))
    })?;
    constructor()
        .await
        .map(Arc::from)
        .map_err(|e| SchoolError::cache_connection(format!("Failed to create {name} cache: {e}")))
}

/// 创建缓存实例，配置的后端不可用时回退到内存缓存
pub(crate) async fn create_cache(cache_type: &str) -> Result<Arc<dyn ObjectCache>> {
    warn!("Attempting to create {} cache backend", cache_type);

    match build_cache(cache_type).await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", cache_type);
            Ok(cache)
        }
        Err(e) if cache_type != FALLBACK_CACHE => {
            warn!("{}; falling back to memory cache", e);
            let cache = build_cache(FALLBACK_CACHE).await?;
            warn!("Successfully created fallback Moka (in-memory) cache backend");
            Ok(cache)
        }
        Err(e) => Err(e),
    }
}

/// 准备服务器启动的上下文
/// 包括存储和缓存
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
        debug!("Debug mode: Cache registry is enabled");
    }

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!(
        "Storage backend ({}) initialized and migrations completed",
        storage.backend_name()
    );

    let config = AppConfig::get();
    let cache = create_cache(&config.cache.cache_type)
        .await
        .expect("Failed to create cache");
    warn!("Cache backend ({}) initialized", cache.backend_name());

    StartupContext { storage, cache }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_cache_falls_back_to_memory() {
        let cache = create_cache("memcached").await.unwrap();
        assert_eq!(cache.backend_name(), "moka");
    }

    #[tokio::test]
    async fn test_moka_cache_is_created_directly() {
        let cache = create_cache("moka").await.unwrap();
        assert_eq!(cache.backend_name(), "moka");
    }
}
