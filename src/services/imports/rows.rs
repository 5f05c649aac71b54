//! 数据行解析与校验

use std::str::FromStr;

use chrono::NaiveDate;
use csv::StringRecord;

use super::mapping::ColumnMapping;
use crate::entity::DATE_FORMAT;
use crate::models::imports::entities::{
    GuardianImportRecord, StaffImportRecord, StudentImportRecord, SubjectImportRecord,
};
use crate::models::imports::responses::ImportRowError;
use crate::utils::validate::{validate_email, validate_identifier, validate_phone};

/// 一行数据，按字段名取值（已去空白，空值视为缺失）
pub struct RowValues<'a> {
    pub row: usize,
    record: &'a StringRecord,
    mapping: &'a ColumnMapping,
}

impl<'a> RowValues<'a> {
    pub fn new(row: usize, record: &'a StringRecord, mapping: &'a ColumnMapping) -> Self {
        Self {
            row,
            record,
            mapping,
        }
    }

    pub fn optional(&self, field: &str) -> Option<&'a str> {
        self.mapping
            .index_of(field)
            .and_then(|i| self.record.get(i))
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    pub fn required(&self, field: &str) -> Result<&'a str, ImportRowError> {
        self.optional(field)
            .ok_or_else(|| self.error(field, format!("{field} is required")))
    }

    fn error(&self, field: &str, message: impl Into<String>) -> ImportRowError {
        ImportRowError::new(self.row, Some(field), message)
    }

    fn check(&self, field: &str, result: Result<(), &'static str>) -> Result<(), ImportRowError> {
        result.map_err(|msg| self.error(field, msg))
    }

    fn parse_enum<T: FromStr>(&self, field: &str) -> Result<Option<T>, ImportRowError> {
        self.optional(field)
            .map(|raw| {
                raw.parse::<T>()
                    .map_err(|_| self.error(field, format!("Unknown {field} '{raw}'")))
            })
            .transpose()
    }

    fn parse_date(&self, field: &str) -> Result<Option<NaiveDate>, ImportRowError> {
        self.optional(field)
            .map(|raw| {
                NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
                    self.error(field, format!("Invalid date '{raw}', expected YYYY-MM-DD"))
                })
            })
            .transpose()
    }
}

/// 学生行；class_name 由调用方解析为班级 ID
pub fn parse_student(
    values: &RowValues<'_>,
) -> Result<(StudentImportRecord, Option<String>), ImportRowError> {
    let admission_no = values.required("admission_no")?;
    values.check("admission_no", validate_identifier(admission_no))?;
    let record = StudentImportRecord {
        admission_no: admission_no.to_string(),
        first_name: values.required("first_name")?.to_string(),
        last_name: values.required("last_name")?.to_string(),
        gender: values.parse_enum("gender")?,
        date_of_birth: values.parse_date("date_of_birth")?,
        class_id: None,
        status: values.parse_enum("status")?,
    };
    let class_name = values.optional("class_name").map(str::to_string);
    Ok((record, class_name))
}

/// 监护人行；可选的 student_admission_no 用于关联学生
pub fn parse_guardian(
    values: &RowValues<'_>,
) -> Result<(GuardianImportRecord, Option<String>), ImportRowError> {
    let full_name = values.required("full_name")?.to_string();
    let phone = values.required("phone")?;
    values.check("phone", validate_phone(phone))?;
    let email = values.optional("email");
    if let Some(email) = email {
        values.check("email", validate_email(email))?;
    }
    let record = GuardianImportRecord {
        full_name,
        phone: phone.to_string(),
        email: email.map(str::to_string),
        relationship: values.optional("relationship").map(str::to_lowercase),
    };
    let admission_no = values.optional("student_admission_no").map(str::to_string);
    Ok((record, admission_no))
}

pub fn parse_staff(values: &RowValues<'_>) -> Result<StaffImportRecord, ImportRowError> {
    let staff_no = values.required("staff_no")?;
    values.check("staff_no", validate_identifier(staff_no))?;
    let full_name = values.required("full_name")?.to_string();
    let email = values.optional("email");
    if let Some(email) = email {
        values.check("email", validate_email(email))?;
    }
    let phone = values.optional("phone");
    if let Some(phone) = phone {
        values.check("phone", validate_phone(phone))?;
    }
    Ok(StaffImportRecord {
        staff_no: staff_no.to_string(),
        full_name,
        email: email.map(str::to_string),
        phone: phone.map(str::to_string),
        position: values.parse_enum("position")?,
    })
}

pub fn parse_subject(values: &RowValues<'_>) -> Result<SubjectImportRecord, ImportRowError> {
    let code = values.required("code")?.to_ascii_uppercase();
    values.check("code", validate_identifier(&code))?;
    Ok(SubjectImportRecord {
        code,
        name: values.required("name")?.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::imports::entities::ImportEntity;
    use crate::models::students::entities::{Gender, StudentStatus};
    use crate::services::imports::mapping::resolve_mapping;

    fn mapping_for(entity: ImportEntity, headers: &[&str]) -> ColumnMapping {
        let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        resolve_mapping(entity, &headers, None).unwrap()
    }

    #[test]
    fn test_student_row_trims_and_parses() {
        let mapping = mapping_for(
            ImportEntity::Students,
            &[
                "admission_no",
                "first_name",
                "last_name",
                "gender",
                "date_of_birth",
                "class_name",
                "status",
            ],
        );
        let record = StringRecord::from(vec![
            " S-001 ", "Amina", " Otieno", "FEMALE", "2012-04-30", " Form 1A ", "",
        ]);
        let (student, class_name) = parse_student(&RowValues::new(1, &record, &mapping)).unwrap();
        assert_eq!(student.admission_no, "S-001");
        assert_eq!(student.last_name, "Otieno");
        assert_eq!(student.gender, Some(Gender::Female));
        assert_eq!(
            student.date_of_birth,
            NaiveDate::from_ymd_opt(2012, 4, 30)
        );
        assert_eq!(student.status, None::<StudentStatus>);
        assert_eq!(class_name.as_deref(), Some("Form 1A"));
    }

    #[test]
    fn test_student_row_errors_name_the_field() {
        let mapping = mapping_for(
            ImportEntity::Students,
            &["admission_no", "first_name", "last_name", "date_of_birth", "gender"],
        );

        let record = StringRecord::from(vec!["S-002", "  ", "Kamau", "", ""]);
        let err = parse_student(&RowValues::new(3, &record, &mapping)).unwrap_err();
        assert_eq!(err.row, 3);
        assert_eq!(err.field.as_deref(), Some("first_name"));

        let record = StringRecord::from(vec!["S-002", "Ben", "Kamau", "30/04/2012", ""]);
        let err = parse_student(&RowValues::new(4, &record, &mapping)).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("date_of_birth"));

        let record = StringRecord::from(vec!["S-002", "Ben", "Kamau", "", "unknown"]);
        let err = parse_student(&RowValues::new(5, &record, &mapping)).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("gender"));
    }

    #[test]
    fn test_guardian_row_validates_contact() {
        let mapping = mapping_for(
            ImportEntity::Guardians,
            &["full_name", "phone", "email", "student_admission_no"],
        );
        let record = StringRecord::from(vec!["Grace W", "+254 711 000111", "", "S-001"]);
        let (guardian, admission_no) =
            parse_guardian(&RowValues::new(1, &record, &mapping)).unwrap();
        assert_eq!(guardian.phone, "+254 711 000111");
        assert_eq!(guardian.email, None);
        assert_eq!(admission_no.as_deref(), Some("S-001"));

        let record = StringRecord::from(vec!["Grace W", "call me", "", ""]);
        let err = parse_guardian(&RowValues::new(2, &record, &mapping)).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("phone"));
    }

    #[test]
    fn test_subject_code_is_uppercased() {
        let mapping = mapping_for(ImportEntity::Subjects, &["code", "name"]);
        let record = StringRecord::from(vec!["mat101", "Mathematics"]);
        let subject = parse_subject(&RowValues::new(1, &record, &mapping)).unwrap();
        assert_eq!(subject.code, "MAT101");
    }

    #[test]
    fn test_short_row_reads_missing_cells_as_empty() {
        let mapping = mapping_for(ImportEntity::Staff, &["staff_no", "full_name", "position"]);
        let record = StringRecord::from(vec!["T-9", "J. Mwangi"]);
        let staff = parse_staff(&RowValues::new(1, &record, &mapping)).unwrap();
        assert_eq!(staff.position, None);
    }
}
