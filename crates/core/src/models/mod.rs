pub mod lecture;
pub mod schedule;
pub mod search;
pub mod table;
