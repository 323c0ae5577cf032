pub mod cache;
pub mod calendar;
pub mod lifecycle;
pub mod summary;
