pub mod entities;
pub mod ledger;
pub mod requests;
pub mod responses;
