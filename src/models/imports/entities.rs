use chrono::NaiveDate;

use crate::models::staff::entities::StaffPosition;
use crate::models::students::entities::{Gender, StudentStatus};

crate::string_enum! {
    // 支持批量导入的实体
    pub enum ImportEntity {
        Students => "students",
        Guardians => "guardians",
        Staff => "staff",
        Subjects => "subjects",
    }
}

impl ImportEntity {
    /// 可映射的全部字段
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            ImportEntity::Students => &[
                "admission_no",
                "first_name",
                "last_name",
                "gender",
                "date_of_birth",
                "class_name",
                "status",
            ],
            ImportEntity::Guardians => &[
                "full_name",
                "phone",
                "email",
                "relationship",
                "student_admission_no",
            ],
            ImportEntity::Staff => &["staff_no", "full_name", "email", "phone", "position"],
            ImportEntity::Subjects => &["code", "name"],
        }
    }

    /// 必填字段
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            ImportEntity::Students => &["admission_no", "first_name", "last_name"],
            ImportEntity::Guardians => &["full_name", "phone"],
            ImportEntity::Staff => &["staff_no", "full_name"],
            ImportEntity::Subjects => &["code", "name"],
        }
    }

    /// 去重键
    pub fn upsert_key(&self) -> &'static str {
        match self {
            ImportEntity::Students => "admission_no",
            ImportEntity::Guardians => "phone",
            ImportEntity::Staff => "staff_no",
            ImportEntity::Subjects => "code",
        }
    }
}

/// 写入结果：新增或覆盖
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentImportRecord {
    pub admission_no: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    // 由 class_name 解析得到
    pub class_id: Option<i64>,
    pub status: Option<StudentStatus>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuardianImportRecord {
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub relationship: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaffImportRecord {
    pub staff_no: String,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<StaffPosition>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectImportRecord {
    pub code: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields_are_mappable() {
        for value in ImportEntity::VALUES {
            let entity: ImportEntity = value.parse().unwrap();
            for field in entity.required_fields() {
                assert!(entity.fields().contains(field), "{entity}: {field}");
            }
            assert!(entity.required_fields().contains(&entity.upsert_key()));
        }
    }
}
