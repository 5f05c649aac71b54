use serde::Serialize;

// 系统信息
#[derive(Debug, Clone, Serialize)]
pub struct SystemInfo {
    pub name: String,
    pub version: String,
    pub environment: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub uptime_seconds: i64,
    pub database_backend: String,
    pub cache_backend: String,
}
