pub mod chart;
pub mod db;
pub mod end;
pub mod init;
pub mod start;
pub mod summary;
pub mod today;
