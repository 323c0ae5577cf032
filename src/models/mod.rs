pub mod chart;
pub mod session;
pub mod summary;
