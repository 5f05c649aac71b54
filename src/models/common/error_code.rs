/// 业务错误码，随响应体 `code` 字段返回，0 表示成功
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    ValidationFailed = 1001,
    NotFound = 1004,
    Conflict = 1009,
    InternalServerError = 1500,

    // 班级
    ClassNotFound = 2000,
    ClassAlreadyExists = 2001,

    // 教职工
    StaffNotFound = 2100,
    StaffAlreadyExists = 2101,

    // 科目
    SubjectNotFound = 2200,
    SubjectAlreadyExists = 2201,

    // 学生
    StudentNotFound = 2300,
    StudentAlreadyExists = 2301,

    // 监护人
    GuardianNotFound = 2400,
    GuardianAlreadyExists = 2401,
    LinkCodeInvalid = 2402,
    GuardianLinkNotFound = 2403,

    // 课表
    TimetableTemplateNotFound = 2500,
    TimetableTemplateAlreadyExists = 2501,
    TimetableEntryNotFound = 2502,
    TimetableConflict = 2503,

    // 账单与缴费
    InvoiceNotFound = 2600,
    InvoiceAlreadyExists = 2601,
    InvoiceAlreadyApproved = 2602,
    InvoiceCancelled = 2603,
    InvoiceHasPayments = 2604,
    PaymentNotFound = 2605,
    PaymentInvalidAmount = 2606,
    LedgerConcurrentUpdate = 2607,

    // 考勤与考试
    AttendanceInvalid = 2700,
    ExamNotFound = 2750,
    ExamResultInvalid = 2751,

    // 导入
    ImportFileMissingColumn = 2800,
    ImportFileParseFailed = 2801,
    ImportFileDataInvalid = 2802,
    ImportMappingInvalid = 2803,
    ImportEntityUnsupported = 2804,
}
