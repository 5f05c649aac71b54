pub mod conflicts;
pub mod entities;
pub mod requests;
pub mod responses;
