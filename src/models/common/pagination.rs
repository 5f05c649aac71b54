use serde::{Deserialize, Serialize};

// 分页查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    #[serde(
        default = "default_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub page: i64,
    #[serde(
        default = "default_size",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub size: i64,
}

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationInfo {
    pub fn new(page: u64, page_size: u64, total: u64, total_pages: u64) -> Self {
        Self {
            page: page as i64,
            page_size: page_size as i64,
            total: total as i64,
            total_pages: total_pages as i64,
        }
    }
}

impl PaginationQuery {
    /// 规范化为 (页码, 每页条数)，页码从 1 开始，每页 1..=100
    pub fn normalized(page: Option<i64>, size: Option<i64>) -> (u64, u64) {
        let page = page.unwrap_or(1).max(1) as u64;
        let size = size.unwrap_or(10).clamp(1, 100) as u64;
        (page, size)
    }
}

// 自定义反序列化函数，支持字符串到i64的转换
fn deserialize_string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct I64Visitor;

    impl<'de> Visitor<'de> for I64Visitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if value <= i64::MAX as u64 {
                Ok(value as i64)
            } else {
                Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            value
                .parse()
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self { page: 1, size: 10 }
    }
}

/// 可选 ID 查询参数的反序列化，兼容字符串（`#[serde(flatten)]` 下查询参数均为字符串）
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInt {
        Int(i64),
        Str(String),
    }

    match Option::<StringOrInt>::deserialize(deserializer)? {
        None => Ok(None),
        Some(StringOrInt::Int(v)) => Ok(Some(v)),
        Some(StringOrInt::Str(s)) if s.trim().is_empty() => Ok(None),
        Some(StringOrInt::Str(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid integer: '{s}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(flatten)]
        pagination: PaginationQuery,
    }

    #[test]
    fn test_string_numbers_are_accepted() {
        let parsed: Wrapper = serde_json::from_str(r#"{"page":"3","size":25}"#).unwrap();
        assert_eq!(parsed.pagination.page, 3);
        assert_eq!(parsed.pagination.size, 25);
    }

    #[derive(Deserialize)]
    struct Filter {
        #[serde(flatten)]
        pagination: PaginationQuery,
        #[serde(default, deserialize_with = "deserialize_optional_i64")]
        class_id: Option<i64>,
    }

    #[test]
    fn test_optional_id_from_string() {
        let parsed: Filter = serde_json::from_str(r#"{"class_id":"12"}"#).unwrap();
        assert_eq!(parsed.class_id, Some(12));
        assert_eq!(parsed.pagination.page, 1);

        let parsed: Filter = serde_json::from_str(r#"{"page":"2"}"#).unwrap();
        assert_eq!(parsed.class_id, None);

        assert!(serde_json::from_str::<Filter>(r#"{"class_id":"abc"}"#).is_err());
    }

    #[test]
    fn test_normalized_clamps() {
        assert_eq!(PaginationQuery::normalized(None, None), (1, 10));
        assert_eq!(PaginationQuery::normalized(Some(-4), Some(1000)), (1, 100));
        assert_eq!(PaginationQuery::normalized(Some(2), Some(0)), (2, 1));
    }
}
