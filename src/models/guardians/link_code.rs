//! 监护人绑定码
//!
//! 绑定码保存在对象缓存中，键为 `guardian_link:{CODE}`，值记录学生 ID 与过期时间。
//! 缓存后端自身也会按 TTL 过期，这里的过期时间用于兜底校验。

use serde::{Deserialize, Serialize};

const CACHE_KEY_PREFIX: &str = "guardian_link:";
// 绑定码最长有效期 7 天
pub const MAX_TTL_SECS: u64 = 7 * 24 * 3600;

/// 实际使用的有效期，限定在 1 秒到 `MAX_TTL_SECS` 之间
pub fn effective_ttl(ttl_secs: u64) -> u64 {
    ttl_secs.clamp(1, MAX_TTL_SECS)
}

/// 缓存中的绑定码记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkCodeGrant {
    pub student_id: i64,
    pub expires_at: i64,
}

impl LinkCodeGrant {
    pub fn new(student_id: i64, now: i64, ttl_secs: u64) -> Self {
        let ttl = i64::try_from(effective_ttl(ttl_secs)).unwrap_or(i64::MAX);
        Self {
            student_id,
            expires_at: now.saturating_add(ttl),
        }
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

/// 规范化用户输入的绑定码：去空白并转大写
pub fn normalize_code(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
        .to_ascii_uppercase()
}

pub fn cache_key(code: &str) -> String {
    format!("{CACHE_KEY_PREFIX}{}", normalize_code(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_expiry_boundary() {
        let grant = LinkCodeGrant::new(7, 1_000, 900);
        assert_eq!(grant.expires_at, 1_900);
        assert!(!grant.is_expired(1_899));
        assert!(grant.is_expired(1_900));
    }

    #[test]
    fn test_oversized_ttl_is_clamped() {
        let grant = LinkCodeGrant::new(7, 1_000, u64::MAX);
        assert_eq!(grant.expires_at, 1_000 + MAX_TTL_SECS as i64);
        assert!(!grant.is_expired(1_000));

        assert_eq!(effective_ttl(0), 1);
        assert_eq!(effective_ttl(900), 900);
    }

    #[test]
    fn test_code_matching_is_case_insensitive() {
        assert_eq!(normalize_code(" ab12-cd34 "), "AB12CD34");
        assert_eq!(cache_key("ab12cd34"), cache_key("AB12CD34"));
        assert_eq!(cache_key("ab12cd34"), "guardian_link:AB12CD34");
    }
}
