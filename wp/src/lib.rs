//! Weekplan - terminal weekly planner
//!
//! A single-screen planner: a 7-day grid of checkbox tasks, a weekly
//! todo list, and a memo pad, persisted one JSON record per week with
//! debounced writes, plus optional LLM-assisted auto-fill that turns a
//! natural-language goal into a pre-populated week.
//!
//! # Core Concepts
//!
//! - **One record per week**: the ISO date of a week's Monday keys both
//!   the in-memory page and its durable copy
//! - **Debounced persistence**: bursts of edits collapse into one write
//!   after a quiet period
//! - **Fail-closed generation**: a generated plan either maps fully onto
//!   the week's structure or is rejected whole
//!
//! # Modules
//!
//! - [`domain`] - Task/week data model and date arithmetic
//! - [`plan`] - Smart plan generation from a goal
//! - [`llm`] - LLM client trait and Anthropic implementation
//! - [`tui`] - The planner screen
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod domain;
pub mod llm;
pub mod plan;
pub mod tui;

// Re-export commonly used types
pub use config::{Config, LlmConfig, StorageConfig};
pub use domain::{DayData, DayKey, Days, GeneratedPlan, Task, TaskColor, TaskEdit, WeeklyData};
pub use llm::{AnthropicClient, CompletionRequest, CompletionResponse, LlmClient, LlmError};
pub use plan::{PlanError, PlanGenerator};
