//! Smart plan generation
//!
//! Maps a free-text goal onto the week's structure via one constrained
//! LLM call. See [`PlanGenerator`].

mod error;
mod generator;

pub use error::PlanError;
pub use generator::PlanGenerator;
