use std::sync::Arc;

use chrono::NaiveDate;

use crate::models::{
    attendance::{entities::AttendanceRecord, requests::MarkAttendanceRequest},
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
    exams::{
        entities::{Exam, ExamResult},
        requests::{CreateExamRequest, ExamQueryParams, ResultEntry},
    },
    guardians::{
        entities::{Guardian, StudentGuardianLink},
        requests::{CreateGuardianRequest, GuardianListQuery},
        responses::{GuardianListResponse, LinkedGuardian},
    },
    imports::entities::{
        GuardianImportRecord, StaffImportRecord, StudentImportRecord, SubjectImportRecord,
        UpsertOutcome,
    },
    invoices::{
        entities::{Invoice, Payment},
        requests::{CreateInvoiceRequest, InvoiceListQuery, RecordPaymentRequest},
        responses::{InvoiceListResponse, PaymentReceipt},
    },
    staff::{
        entities::Staff,
        requests::{CreateStaffRequest, StaffListQuery, UpdateStaffRequest},
        responses::StaffListResponse,
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    subjects::{entities::Subject, requests::CreateSubjectRequest},
    timetables::{
        entities::{TimetableEntry, TimetableTemplate},
        requests::{
            CreateEntryRequest, CreateTemplateRequest, EntryQueryParams, UpdateEntryRequest,
            UpdateTemplateRequest,
        },
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 数据库后端名称（sqlite / postgres / mysql）
    fn backend_name(&self) -> &'static str;

    /// 班级管理方法
    // 创建班级
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 通过名称获取班级（批量导入时解析 class_name）
    async fn get_class_by_name(&self, name: &str) -> Result<Option<Class>>;
    // 列出班级
    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse>;
    // 更新班级信息
    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>>;
    // 删除班级
    async fn delete_class(&self, class_id: i64) -> Result<bool>;

    /// 教职工管理方法
    async fn create_staff(&self, staff: CreateStaffRequest) -> Result<Staff>;
    async fn get_staff_by_id(&self, staff_id: i64) -> Result<Option<Staff>>;
    async fn list_staff_with_pagination(&self, query: StaffListQuery)
    -> Result<StaffListResponse>;
    async fn update_staff(&self, staff_id: i64, update: UpdateStaffRequest)
    -> Result<Option<Staff>>;
    async fn delete_staff(&self, staff_id: i64) -> Result<bool>;
    // 按工号新增或覆盖
    async fn upsert_staff(&self, record: StaffImportRecord) -> Result<UpsertOutcome>;

    /// 科目管理方法
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, subject_id: i64) -> Result<Option<Subject>>;
    // 全部科目，按代码排序
    async fn list_subjects(&self) -> Result<Vec<Subject>>;
    async fn delete_subject(&self, subject_id: i64) -> Result<bool>;
    async fn upsert_subject(&self, record: SubjectImportRecord) -> Result<UpsertOutcome>;

    /// 学生管理方法
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>>;
    async fn get_student_by_admission_no(&self, admission_no: &str) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    async fn update_student(
        &self,
        student_id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    async fn delete_student(&self, student_id: i64) -> Result<bool>;
    // 按学号新增或覆盖
    async fn upsert_student(&self, record: StudentImportRecord) -> Result<UpsertOutcome>;

    /// 监护人管理方法
    async fn create_guardian(&self, guardian: CreateGuardianRequest) -> Result<Guardian>;
    async fn get_guardian_by_id(&self, guardian_id: i64) -> Result<Option<Guardian>>;
    async fn list_guardians_with_pagination(
        &self,
        query: GuardianListQuery,
    ) -> Result<GuardianListResponse>;
    // 按手机号新增或覆盖，返回写入后的监护人
    async fn upsert_guardian(
        &self,
        record: GuardianImportRecord,
    ) -> Result<(Guardian, UpsertOutcome)>;
    // 关联学生与监护人，已关联时返回原有记录
    async fn link_guardian(&self, student_id: i64, guardian_id: i64)
    -> Result<StudentGuardianLink>;
    async fn unlink_guardian(&self, student_id: i64, guardian_id: i64) -> Result<bool>;
    async fn list_student_guardians(&self, student_id: i64) -> Result<Vec<LinkedGuardian>>;

    /// 课表管理方法
    async fn create_template(&self, template: CreateTemplateRequest) -> Result<TimetableTemplate>;
    async fn get_template_by_id(&self, template_id: i64) -> Result<Option<TimetableTemplate>>;
    async fn list_templates(&self) -> Result<Vec<TimetableTemplate>>;
    async fn update_template(
        &self,
        template_id: i64,
        update: UpdateTemplateRequest,
    ) -> Result<Option<TimetableTemplate>>;
    // 删除模板（级联删除条目）
    async fn delete_template(&self, template_id: i64) -> Result<bool>;
    async fn create_entry(
        &self,
        template_id: i64,
        entry: CreateEntryRequest,
    ) -> Result<TimetableEntry>;
    async fn get_entry_by_id(&self, entry_id: i64) -> Result<Option<TimetableEntry>>;
    async fn update_entry(
        &self,
        entry_id: i64,
        update: UpdateEntryRequest,
    ) -> Result<Option<TimetableEntry>>;
    async fn delete_entry(&self, entry_id: i64) -> Result<bool>;
    async fn list_entries(
        &self,
        template_id: i64,
        filter: EntryQueryParams,
    ) -> Result<Vec<TimetableEntry>>;
    // 同一模板、星期、节次下的全部条目
    async fn list_slot_entries(
        &self,
        template_id: i64,
        day_of_week: i32,
        slot: i32,
    ) -> Result<Vec<TimetableEntry>>;

    /// 账单管理方法
    async fn create_invoice(&self, invoice: CreateInvoiceRequest) -> Result<Invoice>;
    async fn get_invoice_by_id(&self, invoice_id: i64) -> Result<Option<Invoice>>;
    async fn list_invoices_with_pagination(
        &self,
        query: InvoiceListQuery,
    ) -> Result<InvoiceListResponse>;
    async fn list_student_invoices(&self, student_id: i64) -> Result<Vec<Invoice>>;
    // 审批账单
    async fn approve_invoice(&self, invoice_id: i64, approved_by: i64) -> Result<Invoice>;
    // 取消账单（仅限无缴费记录）
    async fn cancel_invoice(&self, invoice_id: i64) -> Result<Invoice>;
    async fn list_payments(&self, invoice_id: i64) -> Result<Vec<Payment>>;
    async fn get_payment_by_id(&self, payment_id: i64) -> Result<Option<Payment>>;
    // 登记缴费（单事务）
    async fn record_payment(
        &self,
        invoice_id: i64,
        payment: RecordPaymentRequest,
    ) -> Result<PaymentReceipt>;
    // 作废缴费（单事务），返回更新后的账单
    async fn void_payment(&self, payment_id: i64) -> Result<Invoice>;

    /// 考勤管理方法
    // 批量登记，按 (学生, 日期) 覆盖
    async fn mark_attendance(&self, request: MarkAttendanceRequest) -> Result<usize>;
    async fn list_class_attendance(
        &self,
        class_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>>;
    async fn list_student_attendance(
        &self,
        student_id: i64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>>;

    /// 考试管理方法
    async fn create_exam(&self, exam: CreateExamRequest) -> Result<Exam>;
    async fn get_exam_by_id(&self, exam_id: i64) -> Result<Option<Exam>>;
    async fn list_exams(&self, query: ExamQueryParams) -> Result<Vec<Exam>>;
    async fn delete_exam(&self, exam_id: i64) -> Result<bool>;
    // 按 (考试, 学生) 覆盖
    async fn upsert_exam_result(&self, exam_id: i64, entry: ResultEntry) -> Result<ExamResult>;
    async fn list_exam_results(&self, exam_id: i64) -> Result<Vec<ExamResult>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
