pub mod entities;
pub mod link_code;
pub mod requests;
pub mod responses;
