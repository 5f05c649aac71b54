//! 导入执行：读取 CSV、解析映射、逐行写入

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

use csv::StringRecord;
use tracing::{error, info};

use super::mapping::resolve_mapping;
use super::rows::{RowValues, parse_guardian, parse_staff, parse_student, parse_subject};
use crate::errors::SchoolError;
use crate::models::ErrorCode;
use crate::models::imports::entities::{ImportEntity, UpsertOutcome};
use crate::models::imports::responses::{ImportReport, ImportRowError};
use crate::storage::Storage;

/// 整个文件被拒绝
#[derive(Debug)]
pub struct ImportFailure {
    pub code: ErrorCode,
    pub message: String,
    // 存储层故障对应 500
    pub internal: bool,
}

impl ImportFailure {
    fn rejected(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            internal: false,
        }
    }

    fn internal(err: &SchoolError) -> Self {
        Self {
            code: ErrorCode::InternalServerError,
            message: err.message().to_string(),
            internal: true,
        }
    }
}

/// 数据行号：文件行号减去表头所在的第一行，空行与空白行也占行号
fn data_row(position: Option<&csv::Position>, fallback: usize) -> usize {
    position
        .and_then(|p| usize::try_from(p.line()).ok())
        .map_or(fallback, |line| line.saturating_sub(1).max(1))
}

/// 读取表头与全部数据行（附行号），超出行数上限时拒绝
fn read_csv(
    data: &[u8],
    max_rows: usize,
) -> Result<(Vec<String>, Vec<(usize, StringRecord)>), ImportFailure> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(Cursor::new(data));

    let headers = reader
        .headers()
        .map_err(|e| {
            ImportFailure::rejected(
                ErrorCode::ImportFileParseFailed,
                format!("Failed to read header row: {e}"),
            )
        })?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect::<Vec<_>>();

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            ImportFailure::rejected(
                ErrorCode::ImportFileParseFailed,
                format!(
                    "Failed to parse data row {}: {e}",
                    data_row(e.position(), index + 1)
                ),
            )
        })?;
        // 全空行忽略
        if record.iter().all(|v| v.trim().is_empty()) {
            continue;
        }
        if records.len() == max_rows {
            return Err(ImportFailure::rejected(
                ErrorCode::ImportFileDataInvalid,
                format!("A single import may contain at most {max_rows} data rows"),
            ));
        }
        let row = data_row(record.position(), index + 1);
        records.push((row, record));
    }

    if records.is_empty() {
        return Err(ImportFailure::rejected(
            ErrorCode::ImportFileDataInvalid,
            "The file contains no data rows",
        ));
    }
    Ok((headers, records))
}

/// 行级写入失败：调用方错误计入报告，其余中止导入
fn row_write_error(
    report: &mut ImportReport,
    row: usize,
    err: SchoolError,
) -> Result<(), ImportFailure> {
    if err.is_client_error() {
        report.skip(ImportRowError::new(row, None, err.message()));
        Ok(())
    } else {
        error!("Import aborted at row {}: {}", row, err);
        Err(ImportFailure::internal(&err))
    }
}

fn count(report: &mut ImportReport, outcome: UpsertOutcome) {
    match outcome {
        UpsertOutcome::Inserted => report.inserted += 1,
        UpsertOutcome::Updated => report.updated += 1,
    }
}

pub async fn run_import(
    storage: &Arc<dyn Storage>,
    entity: ImportEntity,
    data: &[u8],
    mapping: Option<&HashMap<String, String>>,
    max_rows: usize,
) -> Result<ImportReport, ImportFailure> {
    let (headers, records) = read_csv(data, max_rows)?;
    let columns = resolve_mapping(entity, &headers, mapping)
        .map_err(|e| ImportFailure::rejected(e.error_code(), e.message()))?;

    let mut report = ImportReport {
        total: records.len(),
        ..Default::default()
    };
    // 同一文件内的班级名解析结果
    let mut class_ids: HashMap<String, Option<i64>> = HashMap::new();

    for (row, record) in &records {
        let values = RowValues::new(*row, record, &columns);
        let row = values.row;

        match entity {
            ImportEntity::Students => {
                let (mut student, class_name) = match parse_student(&values) {
                    Ok(parsed) => parsed,
                    Err(e) => {
                        report.skip(e);
                        continue;
                    }
                };
                if let Some(class_name) = class_name {
                    let class_id = match class_ids.get(&class_name) {
                        Some(cached) => *cached,
                        None => {
                            let found = storage
                                .get_class_by_name(&class_name)
                                .await
                                .map_err(|e| ImportFailure::internal(&e))?
                                .map(|c| c.id);
                            class_ids.insert(class_name.clone(), found);
                            found
                        }
                    };
                    let Some(class_id) = class_id else {
                        report.skip(ImportRowError::new(
                            row,
                            Some("class_name"),
                            format!("Unknown class '{class_name}'"),
                        ));
                        continue;
                    };
                    student.class_id = Some(class_id);
                }
                match storage.upsert_student(student).await {
                    Ok(outcome) => count(&mut report, outcome),
                    Err(e) => row_write_error(&mut report, row, e)?,
                }
            }
            ImportEntity::Guardians => {
                let (guardian, admission_no) = match parse_guardian(&values) {
                    Ok(parsed) => parsed,
                    Err(e) => {
                        report.skip(e);
                        continue;
                    }
                };
                // 先确认学生存在，避免写入后才发现无法关联
                let student_id = match admission_no {
                    Some(admission_no) => match storage
                        .get_student_by_admission_no(&admission_no)
                        .await
                        .map_err(|e| ImportFailure::internal(&e))?
                    {
                        Some(student) => Some(student.id),
                        None => {
                            report.skip(ImportRowError::new(
                                row,
                                Some("student_admission_no"),
                                format!("Unknown student '{admission_no}'"),
                            ));
                            continue;
                        }
                    },
                    None => None,
                };
                let (saved, outcome) = match storage.upsert_guardian(guardian).await {
                    Ok(result) => result,
                    Err(e) => {
                        row_write_error(&mut report, row, e)?;
                        continue;
                    }
                };
                if let Some(student_id) = student_id
                    && let Err(e) = storage.link_guardian(student_id, saved.id).await
                {
                    row_write_error(&mut report, row, e)?;
                    continue;
                }
                count(&mut report, outcome);
            }
            ImportEntity::Staff => match parse_staff(&values) {
                Ok(staff) => match storage.upsert_staff(staff).await {
                    Ok(outcome) => count(&mut report, outcome),
                    Err(e) => row_write_error(&mut report, row, e)?,
                },
                Err(e) => report.skip(e),
            },
            ImportEntity::Subjects => match parse_subject(&values) {
                Ok(subject) => match storage.upsert_subject(subject).await {
                    Ok(outcome) => count(&mut report, outcome),
                    Err(e) => row_write_error(&mut report, row, e)?,
                },
                Err(e) => report.skip(e),
            },
        }
    }

    info!(
        "Imported {}: {} rows, {} inserted, {} updated, {} skipped",
        entity, report.total, report.inserted, report.updated, report.skipped
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classes::requests::CreateClassRequest;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    async fn storage() -> Arc<dyn Storage> {
        Arc::new(SeaOrmStorage::new_in_memory().await)
    }

    #[tokio::test]
    async fn test_student_import_upserts_by_admission_no() {
        let storage = storage().await;
        storage
            .create_class(CreateClassRequest {
                name: "Form 1A".to_string(),
                grade_level: Some(9),
                class_teacher_id: None,
            })
            .await
            .unwrap();

        let csv = "Admission No,First Name,Last Name,Class Name,Gender\n\
                   S-001,Amina,Otieno,Form 1A,female\n\
                   S-002,Ben,,Form 1A,male\n\
                   S-003,Chao,Li,Form 9Z,\n";
        let report = run_import(&storage, ImportEntity::Students, csv.as_bytes(), None, 100)
            .await
            .unwrap();
        assert_eq!(report.total, 3);
        assert_eq!(report.inserted, 1);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.errors[0].row, 2);
        assert_eq!(report.errors[0].field.as_deref(), Some("last_name"));
        assert_eq!(report.errors[1].field.as_deref(), Some("class_name"));

        // 再次导入同一学号为覆盖
        let csv = "admission_no,first_name,last_name\nS-001,Amina,Odhiambo\n";
        let report = run_import(&storage, ImportEntity::Students, csv.as_bytes(), None, 100)
            .await
            .unwrap();
        assert_eq!((report.inserted, report.updated), (0, 1));
        let student = storage
            .get_student_by_admission_no("S-001")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(student.last_name, "Odhiambo");
    }

    #[tokio::test]
    async fn test_guardian_import_links_student() {
        let storage = storage().await;
        let csv = "admission_no,first_name,last_name\nS-010,Zawadi,Njeri\n";
        run_import(&storage, ImportEntity::Students, csv.as_bytes(), None, 100)
            .await
            .unwrap();

        let mapping = HashMap::from([
            ("Parent".to_string(), "full_name".to_string()),
            ("Mobile".to_string(), "phone".to_string()),
            ("Child".to_string(), "student_admission_no".to_string()),
        ]);
        let csv = "Parent,Mobile,Child\n\
                   Mary Njeri,0711000222,S-010\n\
                   Mary Njeri,0711000222,S-010\n\
                   John Doe,0722000333,S-999\n";
        let report = run_import(
            &storage,
            ImportEntity::Guardians,
            csv.as_bytes(),
            Some(&mapping),
            100,
        )
        .await
        .unwrap();
        assert_eq!((report.inserted, report.updated, report.skipped), (1, 1, 1));

        let student = storage
            .get_student_by_admission_no("S-010")
            .await
            .unwrap()
            .unwrap();
        let linked = storage.list_student_guardians(student.id).await.unwrap();
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].guardian.phone, "0711000222");
    }

    #[tokio::test]
    async fn test_file_level_rejections() {
        let storage = storage().await;

        let err = run_import(&storage, ImportEntity::Subjects, b"code\nMAT\n", None, 100)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ImportFileMissingColumn);

        let err = run_import(&storage, ImportEntity::Subjects, b"code,name\n", None, 100)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ImportFileDataInvalid);

        let csv = "code,name\nA1,One\nA2,Two\nA3,Three\n";
        let err = run_import(&storage, ImportEntity::Subjects, csv.as_bytes(), None, 2)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ImportFileDataInvalid);
        assert!(storage.list_subjects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_row_numbers_follow_file_lines() {
        let storage = storage().await;

        // 第 2 行为空白行，第 3 行缺少 name
        let csv = "code,name\nA1,One\n   \nA2,\nA3,Three\n";
        let report = run_import(&storage, ImportEntity::Subjects, csv.as_bytes(), None, 100)
            .await
            .unwrap();
        assert_eq!((report.total, report.inserted, report.skipped), (3, 2, 1));
        assert_eq!(report.errors[0].row, 3);
        assert_eq!(report.errors[0].field.as_deref(), Some("name"));

        let csv = b"code,name\nB1,One\n  \nB\xff,Bad\n";
        let err = run_import(&storage, ImportEntity::Subjects, csv, None, 100)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ImportFileParseFailed);
        assert!(err.message.contains("row 3"), "{}", err.message);
    }
}
