//! Domain types for the weekly planner
//!
//! Core types: Task, DayData, WeeklyData, plus the week date arithmetic.
//! `WeeklyData` serializes to the JSON shape the week store persists.

pub mod dates;
mod task;
mod week;

pub use task::{Task, TaskColor, TaskEdit, cycle_color, new_task_id};
pub use week::{DayData, DayKey, Days, GeneratedPlan, WeeklyData};
