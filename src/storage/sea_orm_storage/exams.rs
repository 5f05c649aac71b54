//! 考试与成绩存储操作

use super::SeaOrmStorage;
use crate::entity::exam_results::{
    ActiveModel as ResultActiveModel, Column as ResultColumn, Entity as ExamResults,
};
use crate::entity::exams::{ActiveModel as ExamActiveModel, Column as ExamColumn, Entity as Exams};
use crate::entity::format_date;
use crate::errors::{Result, SchoolError};
use crate::models::exams::{
    entities::{Exam, ExamResult},
    requests::{CreateExamRequest, ExamQueryParams, ResultEntry},
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_exam_impl(&self, req: CreateExamRequest) -> Result<Exam> {
        let model = ExamActiveModel {
            name: Set(req.name),
            term: Set(req.term),
            class_id: Set(req.class_id),
            subject_id: Set(req.subject_id),
            max_score: Set(req.max_score),
            exam_date: Set(req.exam_date.map(format_date)),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await?;
        Ok(result.into_exam())
    }

    pub async fn get_exam_by_id_impl(&self, exam_id: i64) -> Result<Option<Exam>> {
        let result = Exams::find_by_id(exam_id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考试失败: {e}")))?;

        Ok(result.map(|m| m.into_exam()))
    }

    pub async fn list_exams_impl(&self, query: ExamQueryParams) -> Result<Vec<Exam>> {
        let mut select = Exams::find();

        if let Some(class_id) = query.class_id {
            select = select.filter(ExamColumn::ClassId.eq(class_id));
        }
        if let Some(ref term) = query.term
            && !term.trim().is_empty()
        {
            select = select.filter(ExamColumn::Term.eq(term.trim()));
        }

        let exams = select
            .order_by_desc(ExamColumn::CreatedAt)
            .order_by_desc(ExamColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考试列表失败: {e}")))?;

        Ok(exams.into_iter().map(|m| m.into_exam()).collect())
    }

    pub async fn delete_exam_impl(&self, exam_id: i64) -> Result<bool> {
        let result = Exams::delete_by_id(exam_id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除考试失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 按 (考试, 学生) 写入成绩，已有成绩时覆盖
    pub async fn upsert_exam_result_impl(
        &self,
        exam_id: i64,
        entry: ResultEntry,
    ) -> Result<ExamResult> {
        let model = ResultActiveModel {
            exam_id: Set(exam_id),
            student_id: Set(entry.student_id),
            score: Set(entry.score),
            remark: Set(entry.remark),
            recorded_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        ExamResults::insert(model)
            .on_conflict(
                OnConflict::columns([ResultColumn::ExamId, ResultColumn::StudentId])
                    .update_columns([
                        ResultColumn::Score,
                        ResultColumn::Remark,
                        ResultColumn::RecordedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        let saved = ExamResults::find()
            .filter(ResultColumn::ExamId.eq(exam_id))
            .filter(ResultColumn::StudentId.eq(entry.student_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| SchoolError::database_operation("成绩写入后未找到"))?;

        Ok(saved.into_result())
    }

    pub async fn list_exam_results_impl(&self, exam_id: i64) -> Result<Vec<ExamResult>> {
        let results = ExamResults::find()
            .filter(ResultColumn::ExamId.eq(exam_id))
            .order_by_desc(ResultColumn::Score)
            .order_by_asc(ResultColumn::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询考试成绩失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_result()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classes::requests::CreateClassRequest;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::models::subjects::requests::CreateSubjectRequest;

    #[tokio::test]
    async fn test_result_upsert_overwrites_score() {
        let storage = SeaOrmStorage::new_in_memory().await;
        let class_id = storage
            .create_class_impl(CreateClassRequest {
                name: "Form 4".to_string(),
                grade_level: Some(4),
                class_teacher_id: None,
            })
            .await
            .unwrap()
            .id;
        let subject_id = storage
            .create_subject_impl(CreateSubjectRequest {
                code: "CHE".to_string(),
                name: "Chemistry".to_string(),
            })
            .await
            .unwrap()
            .id;
        let student_id = storage
            .create_student_impl(CreateStudentRequest {
                admission_no: "ADM-501".to_string(),
                first_name: "Nia".to_string(),
                last_name: "Achieng".to_string(),
                gender: None,
                date_of_birth: None,
                class_id: Some(class_id),
                status: None,
            })
            .await
            .unwrap()
            .id;

        let exam = storage
            .create_exam_impl(CreateExamRequest {
                name: "Mid-term".to_string(),
                term: "2025-T2".to_string(),
                class_id,
                subject_id,
                max_score: 50.0,
                exam_date: None,
            })
            .await
            .unwrap();

        let entry = |score| ResultEntry {
            student_id,
            score,
            remark: None,
        };
        let first = storage
            .upsert_exam_result_impl(exam.id, entry(31.0))
            .await
            .unwrap();
        let second = storage
            .upsert_exam_result_impl(exam.id, entry(42.5))
            .await
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.score, 42.5);

        let results = storage.list_exam_results_impl(exam.id).await.unwrap();
        assert_eq!(results.len(), 1);

        let listed = storage
            .list_exams_impl(ExamQueryParams {
                class_id: Some(class_id),
                term: Some("2025-T2".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);

        assert!(storage.delete_exam_impl(exam.id).await.unwrap());
        assert!(storage.list_exam_results_impl(exam.id).await.unwrap().is_empty());
    }
}
