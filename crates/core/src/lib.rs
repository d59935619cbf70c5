//! # CourseGrid Core
//!
//! Domain logic for the course planner: catalog models, the schedule text
//! parser, the filter engine and its worker thread, the timetable store, and
//! the grid geometry behind drag-and-drop.

pub mod errors;
pub mod filter;
pub mod grid;
pub mod models;
pub mod parser;
pub mod session;
pub mod store;
pub mod worker;
