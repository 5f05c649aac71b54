//! 预导入模块，方便使用

pub use super::attendance::{
    ActiveModel as AttendanceActiveModel, Entity as Attendance, Model as AttendanceModel,
};
pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::exam_results::{
    ActiveModel as ExamResultActiveModel, Entity as ExamResults, Model as ExamResultModel,
};
pub use super::exams::{ActiveModel as ExamActiveModel, Entity as Exams, Model as ExamModel};
pub use super::guardians::{
    ActiveModel as GuardianActiveModel, Entity as Guardians, Model as GuardianModel,
};
pub use super::invoices::{
    ActiveModel as InvoiceActiveModel, Entity as Invoices, Model as InvoiceModel,
};
pub use super::payments::{
    ActiveModel as PaymentActiveModel, Entity as Payments, Model as PaymentModel,
};
pub use super::staff::{ActiveModel as StaffActiveModel, Entity as Staff, Model as StaffModel};
pub use super::student_guardians::{
    ActiveModel as StudentGuardianActiveModel, Entity as StudentGuardians,
    Model as StudentGuardianModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
pub use super::timetable_entries::{
    ActiveModel as TimetableEntryActiveModel, Entity as TimetableEntries,
    Model as TimetableEntryModel,
};
pub use super::timetable_templates::{
    ActiveModel as TimetableTemplateActiveModel, Entity as TimetableTemplates,
    Model as TimetableTemplateModel,
};
