pub mod error_code;
pub mod pagination;
pub mod response;
pub mod string_enum;

pub use pagination::{PaginationInfo, PaginationQuery};
