//! 表头与字段的映射
//!
//! 显式映射 `{ "csv 列名": "字段" }` 优先，其余列按规范化后的列名匹配字段。
//! 规范化：去首尾空白、转小写、空格与连字符替换为下划线。

use std::collections::HashMap;

use crate::models::ErrorCode;
use crate::models::imports::entities::ImportEntity;

pub fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// 映射失败，导入在处理任何数据行之前终止
#[derive(Debug, Clone, PartialEq)]
pub enum MappingError {
    UnknownField(String),
    UnknownColumn(String),
    DuplicateField(String),
    MissingColumn(String),
}

impl MappingError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingColumn(_) => ErrorCode::ImportFileMissingColumn,
            _ => ErrorCode::ImportMappingInvalid,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::UnknownField(field) => format!("'{field}' is not a field of this entity"),
            Self::UnknownColumn(column) => format!("Mapped column '{column}' is not in the file"),
            Self::DuplicateField(field) => {
                format!("Field '{field}' is mapped from more than one column")
            }
            Self::MissingColumn(field) => format!("Missing required column: {field}"),
        }
    }
}

/// 字段到列下标
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    columns: HashMap<&'static str, usize>,
}

impl ColumnMapping {
    pub fn index_of(&self, field: &str) -> Option<usize> {
        self.columns.get(field).copied()
    }
}

/// 根据表头和可选的显式映射生成列映射
pub fn resolve_mapping(
    entity: ImportEntity,
    headers: &[String],
    explicit: Option<&HashMap<String, String>>,
) -> Result<ColumnMapping, MappingError> {
    let fields = entity.fields();
    let lookup_field = |name: &str| -> Option<&'static str> {
        let normalized = normalize_header(name);
        fields.iter().copied().find(|f| *f == normalized)
    };
    let normalized_headers: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();

    let mut columns: HashMap<&'static str, usize> = HashMap::new();
    let mut claimed = vec![false; headers.len()];

    if let Some(explicit) = explicit {
        // 按列名排序，保证报错稳定
        let mut pairs: Vec<_> = explicit.iter().collect();
        pairs.sort();
        for (column, target) in pairs {
            let field =
                lookup_field(target).ok_or_else(|| MappingError::UnknownField(target.clone()))?;
            let wanted = normalize_header(column);
            let index = normalized_headers
                .iter()
                .position(|h| *h == wanted)
                .ok_or_else(|| MappingError::UnknownColumn(column.clone()))?;
            if columns.insert(field, index).is_some() {
                return Err(MappingError::DuplicateField(field.to_string()));
            }
            claimed[index] = true;
        }
    }

    for (index, header) in normalized_headers.iter().enumerate() {
        if claimed[index] {
            continue;
        }
        if let Some(field) = lookup_field(header) {
            columns.entry(field).or_insert(index);
        }
    }

    for required in entity.required_fields() {
        if !columns.contains_key(required) {
            return Err(MappingError::MissingColumn(required.to_string()));
        }
    }

    Ok(ColumnMapping { columns })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header(" Admission No "), "admission_no");
        assert_eq!(normalize_header("Date-Of-Birth"), "date_of_birth");
    }

    #[test]
    fn test_headers_matched_by_normalized_name() {
        let mapping = resolve_mapping(
            ImportEntity::Students,
            &headers(&["Admission No", "First Name", "Last-Name", "Notes"]),
            None,
        )
        .unwrap();
        assert_eq!(mapping.index_of("admission_no"), Some(0));
        assert_eq!(mapping.index_of("last_name"), Some(2));
        assert_eq!(mapping.index_of("gender"), None);
    }

    #[test]
    fn test_explicit_mapping_takes_precedence() {
        let explicit = HashMap::from([
            ("Adm".to_string(), "admission_no".to_string()),
            ("Given".to_string(), "first_name".to_string()),
            ("Surname".to_string(), "last_name".to_string()),
        ]);
        let mapping = resolve_mapping(
            ImportEntity::Students,
            &headers(&["Surname", "Given", "adm", "class name"]),
            Some(&explicit),
        )
        .unwrap();
        assert_eq!(mapping.index_of("admission_no"), Some(2));
        assert_eq!(mapping.index_of("first_name"), Some(1));
        assert_eq!(mapping.index_of("last_name"), Some(0));
        assert_eq!(mapping.index_of("class_name"), Some(3));
    }

    #[test]
    fn test_mapping_target_must_be_entity_field() {
        let explicit = HashMap::from([("Code".to_string(), "subject_code".to_string())]);
        let err = resolve_mapping(
            ImportEntity::Subjects,
            &headers(&["Code", "Name"]),
            Some(&explicit),
        )
        .unwrap_err();
        assert_eq!(err, MappingError::UnknownField("subject_code".to_string()));
        assert_eq!(err.error_code(), ErrorCode::ImportMappingInvalid);
    }

    #[test]
    fn test_missing_required_column() {
        let err = resolve_mapping(ImportEntity::Guardians, &headers(&["Full Name"]), None)
            .unwrap_err();
        assert_eq!(err, MappingError::MissingColumn("phone".to_string()));
        assert_eq!(err.error_code(), ErrorCode::ImportFileMissingColumn);
    }

    #[test]
    fn test_mapped_column_must_exist() {
        let explicit = HashMap::from([("Mobile".to_string(), "phone".to_string())]);
        let err = resolve_mapping(
            ImportEntity::Guardians,
            &headers(&["Full Name", "Phone"]),
            Some(&explicit),
        )
        .unwrap_err();
        assert_eq!(err, MappingError::UnknownColumn("Mobile".to_string()));
    }
}
