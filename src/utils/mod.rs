pub mod extractor;
pub mod parameter_error_handler;
pub mod random_code;
pub mod sql;
pub mod validate;

pub use extractor::{
    SafeClassIdI64, SafeEntryIdI64, SafeExamIdI64, SafeGuardianIdI64, SafeIDI64,
    SafeInvoiceIdI64, SafePaymentIdI64, SafeStudentIdI64, SafeTemplateIdI64,
};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::escape_like_pattern;
