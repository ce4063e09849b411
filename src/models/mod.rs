pub mod alert;
pub mod catalog;
pub mod report;
pub mod user;
