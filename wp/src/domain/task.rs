//! Task line items
//!
//! A task is one checkbox row in a day column or the weekly todo list:
//! free text, a done flag, and an optional priority color. Ids are minted
//! client-side and only need to be unique within their containing list.

use serde::{Deserialize, Serialize};

/// Priority color on a task's row marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskColor {
    Red,
    Blue,
    Yellow,
}

/// Advance a color one step through the fixed cycle
///
/// `None → Red → Blue → Yellow → None`, independent of any other field.
pub fn cycle_color(current: Option<TaskColor>) -> Option<TaskColor> {
    match current {
        None => Some(TaskColor::Red),
        Some(TaskColor::Red) => Some(TaskColor::Blue),
        Some(TaskColor::Blue) => Some(TaskColor::Yellow),
        Some(TaskColor::Yellow) => None,
    }
}

/// A single checkbox line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<TaskColor>,
}

impl Task {
    /// Create a task with a fresh id and the given text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: new_task_id(),
            text: text.into(),
            done: false,
            color: None,
        }
    }

    /// An empty task with a fresh id, used to pad sparse lists on write
    pub fn empty() -> Self {
        Self::new("")
    }

    /// The synthetic task returned for out-of-range reads
    ///
    /// Carries no id: it exists only as a read-side stand-in and is never
    /// stored. Writing to the same index goes through the padding path,
    /// which mints real ids.
    pub fn placeholder() -> Self {
        Self {
            id: String::new(),
            text: String::new(),
            done: false,
            color: None,
        }
    }

    /// Apply a single-field edit
    pub fn apply(&mut self, edit: TaskEdit) {
        match edit {
            TaskEdit::Text(text) => self.text = text,
            TaskEdit::Done(done) => self.done = done,
            TaskEdit::Color(color) => self.color = color,
        }
    }
}

/// A typed single-field task update
///
/// Each variant carries its own payload, so an edit can never pair a
/// field with a value of the wrong type.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskEdit {
    Text(String),
    Done(bool),
    Color(Option<TaskColor>),
}

/// Mint a task id
pub fn new_task_id() -> String {
    uuid::Uuid::now_v7().to_string()
}
