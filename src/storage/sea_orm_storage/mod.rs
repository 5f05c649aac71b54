//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod attendance;
mod classes;
mod exams;
mod guardians;
mod invoices;
mod staff;
mod students;
mod subjects;
mod timetables;

use crate::config::AppConfig;
use crate::errors::{Result, SchoolError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbBackend};
use std::time::Duration;
use tracing::info;

use crate::utils::escape_like_pattern;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

#[cfg(test)]
impl SeaOrmStorage {
    /// 测试用内存数据库（单连接，保证所有查询落在同一个库上）
    pub(crate) async fn new_in_memory() -> Self {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opt)
            .await
            .expect("failed to open in-memory sqlite");
        Migrator::up(&db, None)
            .await
            .expect("failed to run migrations");
        Self { db }
    }
}

/// 规范化搜索关键字，空白视为未提供
pub(crate) fn search_pattern(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(escape_like_pattern)
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
impl Storage for SeaOrmStorage {
    fn backend_name(&self) -> &'static str {
        match self.db.get_database_backend() {
            DbBackend::Sqlite => "sqlite",
            DbBackend::Postgres => "postgres",
            DbBackend::MySql => "mysql",
            #[allow(unreachable_patterns)]
            _ => "unknown",
        }
    }

    // 班级模块
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn get_class_by_name(&self, name: &str) -> Result<Option<Class>> {
        self.get_class_by_name_impl(name).await
    }

    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        self.list_classes_with_pagination_impl(query).await
    }

    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        self.update_class_impl(class_id, update).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        self.delete_class_impl(class_id).await
    }

    // 教职工模块
    async fn create_staff(&self, staff: CreateStaffRequest) -> Result<Staff> {
        self.create_staff_impl(staff).await
    }

    async fn get_staff_by_id(&self, staff_id: i64) -> Result<Option<Staff>> {
        self.get_staff_by_id_impl(staff_id).await
    }

    async fn list_staff_with_pagination(
        &self,
        query: StaffListQuery,
    ) -> Result<StaffListResponse> {
        self.list_staff_with_pagination_impl(query).await
    }

    async fn update_staff(
        &self,
        staff_id: i64,
        update: UpdateStaffRequest,
    ) -> Result<Option<Staff>> {
        self.update_staff_impl(staff_id, update).await
    }

    async fn delete_staff(&self, staff_id: i64) -> Result<bool> {
        self.delete_staff_impl(staff_id).await
    }

    async fn upsert_staff(&self, record: StaffImportRecord) -> Result<UpsertOutcome> {
        self.upsert_staff_impl(record).await
    }

    // 科目模块
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(subject).await
    }

    async fn get_subject_by_id(&self, subject_id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(subject_id).await
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.list_subjects_impl().await
    }

    async fn delete_subject(&self, subject_id: i64) -> Result<bool> {
        self.delete_subject_impl(subject_id).await
    }

    async fn upsert_subject(&self, record: SubjectImportRecord) -> Result<UpsertOutcome> {
        self.upsert_subject_impl(record).await
    }

    // 学生模块
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, student_id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(student_id).await
    }

    async fn get_student_by_admission_no(&self, admission_no: &str) -> Result<Option<Student>> {
        self.get_student_by_admission_no_impl(admission_no).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn update_student(
        &self,
        student_id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(student_id, update).await
    }

    async fn delete_student(&self, student_id: i64) -> Result<bool> {
        self.delete_student_impl(student_id).await
    }

    async fn upsert_student(&self, record: StudentImportRecord) -> Result<UpsertOutcome> {
        self.upsert_student_impl(record).await
    }

    // 监护人模块
    async fn create_guardian(&self, guardian: CreateGuardianRequest) -> Result<Guardian> {
        self.create_guardian_impl(guardian).await
    }

    async fn get_guardian_by_id(&self, guardian_id: i64) -> Result<Option<Guardian>> {
        self.get_guardian_by_id_impl(guardian_id).await
    }

    async fn list_guardians_with_pagination(
        &self,
        query: GuardianListQuery,
    ) -> Result<GuardianListResponse> {
        self.list_guardians_with_pagination_impl(query).await
    }

    async fn upsert_guardian(
        &self,
        record: GuardianImportRecord,
    ) -> Result<(Guardian, UpsertOutcome)> {
        self.upsert_guardian_impl(record).await
    }

    async fn link_guardian(
        &self,
        student_id: i64,
        guardian_id: i64,
    ) -> Result<StudentGuardianLink> {
        self.link_guardian_impl(student_id, guardian_id).await
    }

    async fn unlink_guardian(&self, student_id: i64, guardian_id: i64) -> Result<bool> {
        self.unlink_guardian_impl(student_id, guardian_id).await
    }

    async fn list_student_guardians(&self, student_id: i64) -> Result<Vec<LinkedGuardian>> {
        self.list_student_guardians_impl(student_id).await
    }

    // 课表模块
    async fn create_template(&self, template: CreateTemplateRequest) -> Result<TimetableTemplate> {
        self.create_template_impl(template).await
    }

    async fn get_template_by_id(&self, template_id: i64) -> Result<Option<TimetableTemplate>> {
        self.get_template_by_id_impl(template_id).await
    }

    async fn list_templates(&self) -> Result<Vec<TimetableTemplate>> {
        self.list_templates_impl().await
    }

    async fn update_template(
        &self,
        template_id: i64,
        update: UpdateTemplateRequest,
    ) -> Result<Option<TimetableTemplate>> {
        self.update_template_impl(template_id, update).await
    }

    async fn delete_template(&self, template_id: i64) -> Result<bool> {
        self.delete_template_impl(template_id).await
    }

    async fn create_entry(
        &self,
        template_id: i64,
        entry: CreateEntryRequest,
    ) -> Result<TimetableEntry> {
        self.create_entry_impl(template_id, entry).await
    }

    async fn get_entry_by_id(&self, entry_id: i64) -> Result<Option<TimetableEntry>> {
        self.get_entry_by_id_impl(entry_id).await
    }

    async fn update_entry(
        &self,
        entry_id: i64,
        update: UpdateEntryRequest,
    ) -> Result<Option<TimetableEntry>> {
        self.update_entry_impl(entry_id, update).await
    }

    async fn delete_entry(&self, entry_id: i64) -> Result<bool> {
        self.delete_entry_impl(entry_id).await
    }

    async fn list_entries(
        &self,
        template_id: i64,
        filter: EntryQueryParams,
    ) -> Result<Vec<TimetableEntry>> {
        self.list_entries_impl(template_id, filter).await
    }

    async fn list_slot_entries(
        &self,
        template_id: i64,
        day_of_week: i32,
        slot: i32,
    ) -> Result<Vec<TimetableEntry>> {
        self.list_slot_entries_impl(template_id, day_of_week, slot)
            .await
    }

    // 账单模块
    async fn create_invoice(&self, invoice: CreateInvoiceRequest) -> Result<Invoice> {
        self.create_invoice_impl(invoice).await
    }

    async fn get_invoice_by_id(&self, invoice_id: i64) -> Result<Option<Invoice>> {
        self.get_invoice_by_id_impl(invoice_id).await
    }

    async fn list_invoices_with_pagination(
        &self,
        query: InvoiceListQuery,
    ) -> Result<InvoiceListResponse> {
        self.list_invoices_with_pagination_impl(query).await
    }

    async fn list_student_invoices(&self, student_id: i64) -> Result<Vec<Invoice>> {
        self.list_student_invoices_impl(student_id).await
    }

    async fn approve_invoice(&self, invoice_id: i64, approved_by: i64) -> Result<Invoice> {
        self.approve_invoice_impl(invoice_id, approved_by).await
    }

    async fn cancel_invoice(&self, invoice_id: i64) -> Result<Invoice> {
        self.cancel_invoice_impl(invoice_id).await
    }

    async fn list_payments(&self, invoice_id: i64) -> Result<Vec<Payment>> {
        self.list_payments_impl(invoice_id).await
    }

    async fn get_payment_by_id(&self, payment_id: i64) -> Result<Option<Payment>> {
        self.get_payment_by_id_impl(payment_id).await
    }

    async fn record_payment(
        &self,
        invoice_id: i64,
        payment: RecordPaymentRequest,
    ) -> Result<PaymentReceipt> {
        self.record_payment_impl(invoice_id, payment).await
    }

    async fn void_payment(&self, payment_id: i64) -> Result<Invoice> {
        self.void_payment_impl(payment_id).await
    }

    // 考勤模块
    async fn mark_attendance(&self, request: MarkAttendanceRequest) -> Result<usize> {
        self.mark_attendance_impl(request).await
    }

    async fn list_class_attendance(
        &self,
        class_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>> {
        self.list_class_attendance_impl(class_id, date).await
    }

    async fn list_student_attendance(
        &self,
        student_id: i64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>> {
        self.list_student_attendance_impl(student_id, from, to)
            .await
    }

    // 考试模块
    async fn create_exam(&self, exam: CreateExamRequest) -> Result<Exam> {
        self.create_exam_impl(exam).await
    }

    async fn get_exam_by_id(&self, exam_id: i64) -> Result<Option<Exam>> {
        self.get_exam_by_id_impl(exam_id).await
    }

    async fn list_exams(&self, query: ExamQueryParams) -> Result<Vec<Exam>> {
        self.list_exams_impl(query).await
    }

    async fn delete_exam(&self, exam_id: i64) -> Result<bool> {
        self.delete_exam_impl(exam_id).await
    }

    async fn upsert_exam_result(&self, exam_id: i64, entry: ResultEntry) -> Result<ExamResult> {
        self.upsert_exam_result_impl(exam_id, entry).await
    }

    async fn list_exam_results(&self, exam_id: i64) -> Result<Vec<ExamResult>> {
        self.list_exam_results_impl(exam_id).await
    }
}
