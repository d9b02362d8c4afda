pub mod calendar;
pub mod list;
pub mod report;
pub mod validate;
