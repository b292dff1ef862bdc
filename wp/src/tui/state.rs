//! TUI application state
//!
//! Pure data structures for the planner screen. No rendering logic here.
//! The state owns the single in-memory `WeeklyData` for the displayed
//! week; everything durable goes through the runner's debounced saver.

use crate::domain::{DayKey, Task, TaskEdit, WeeklyData};

/// Task rows shown (and addressable) per day column
pub const DAY_ROWS: usize = 6;

/// Rows shown in the weekly todo panel
pub const TODO_ROWS: usize = 8;

/// Which pane owns the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// One of the seven day columns
    Day(DayKey),
    /// The weekly todo list
    Todo,
    /// The memo pad
    Memo,
}

/// Pane order for Tab / left-right cycling
const FOCUS_ORDER: [Focus; 9] = [
    Focus::Day(DayKey::Mon),
    Focus::Day(DayKey::Tue),
    Focus::Day(DayKey::Wed),
    Focus::Day(DayKey::Thu),
    Focus::Day(DayKey::Fri),
    Focus::Day(DayKey::Sat),
    Focus::Day(DayKey::Sun),
    Focus::Todo,
    Focus::Memo,
];

fn focus_index(focus: Focus) -> usize {
    FOCUS_ORDER.iter().position(|&f| f == focus).unwrap_or(0)
}

/// Interaction mode (modal)
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InteractionMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Editing the focused task row's text
    EditTask(String),
    /// Editing the focused day's note
    EditNote(String),
    /// Editing the memo pad
    EditMemo(String),
    /// Smart-plan goal dialog (g key)
    GoalPrompt(String),
    /// Help overlay
    Help,
}

/// Deferred work the runner performs outside the key handler
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    /// Switch the displayed week (flush, then load or default)
    LoadWeek(String),
    /// Start a smart-plan generation for the current week
    Generate(String),
}

/// Planner application state
#[derive(Debug)]
pub struct AppState {
    /// Week currently displayed (ISO date of its Monday)
    pub week_id: String,
    /// In-memory planner page for that week
    pub data: WeeklyData,
    /// Focused pane
    pub focus: Focus,
    /// Selected row within the focused pane
    pub row: usize,
    /// Current interaction mode
    pub mode: InteractionMode,
    /// A generation request is in flight
    pub generating: bool,
    /// In-memory state differs from the last scheduled save
    pub dirty: bool,
    /// Work for the runner to pick up on the next tick
    pub pending_action: Option<PendingAction>,
    /// Transient informational message
    pub status_message: Option<String>,
    /// Transient error message
    pub error_message: Option<String>,
    /// Exit requested
    pub should_quit: bool,
}

impl AppState {
    /// Create state showing the empty page for a week
    pub fn new(week_id: impl Into<String>) -> Self {
        let week_id = week_id.into();
        Self {
            data: WeeklyData::empty(week_id.clone()),
            week_id,
            focus: Focus::Day(DayKey::Mon),
            row: 0,
            mode: InteractionMode::Normal,
            generating: false,
            dirty: false,
            pending_action: None,
            status_message: None,
            error_message: None,
            should_quit: false,
        }
    }

    /// Swap in a different week's page
    ///
    /// Keeps the cursor position (clamped), clears the dirty flag: the
    /// incoming data is exactly what the store holds.
    pub fn replace_week(&mut self, week_id: impl Into<String>, data: WeeklyData) {
        self.week_id = week_id.into();
        self.data = data;
        self.dirty = false;
        self.row = self.row.min(self.max_row());
    }

    /// Highest selectable row in the focused pane
    pub fn max_row(&self) -> usize {
        match self.focus {
            Focus::Day(_) => DAY_ROWS - 1,
            Focus::Todo => TODO_ROWS - 1,
            Focus::Memo => 0,
        }
    }

    /// Read the task under the cursor (placeholder when out of range)
    pub fn selected_task(&self) -> Option<Task> {
        match self.focus {
            Focus::Day(day) => Some(self.data.day_task(day, self.row)),
            Focus::Todo => Some(self.data.todo_task(self.row)),
            Focus::Memo => None,
        }
    }

    /// Apply an edit to the task under the cursor
    pub fn edit_selected_task(&mut self, edit: TaskEdit) {
        match self.focus {
            Focus::Day(day) => self.data.set_day_task(day, self.row, edit),
            Focus::Todo => self.data.set_todo_task(self.row, edit),
            Focus::Memo => return,
        }
        self.dirty = true;
    }

    /// Toggle the done flag of the task under the cursor
    pub fn toggle_selected_done(&mut self) {
        if let Some(task) = self.selected_task() {
            self.edit_selected_task(TaskEdit::Done(!task.done));
        }
    }

    /// Cycle the color of the task under the cursor
    pub fn cycle_selected_color(&mut self) {
        match self.focus {
            Focus::Day(day) => self.data.cycle_day_task_color(day, self.row),
            Focus::Todo => self.data.cycle_todo_task_color(self.row),
            Focus::Memo => return,
        }
        self.dirty = true;
    }

    /// Replace the focused day's note
    pub fn set_selected_note(&mut self, note: String) {
        if let Focus::Day(day) = self.focus {
            self.data.set_note(day, note);
            self.dirty = true;
        }
    }

    /// Replace the memo pad text
    pub fn set_memo(&mut self, memo: String) {
        self.data.set_memo(memo);
        self.dirty = true;
    }

    /// Move focus to the next pane
    pub fn focus_next(&mut self) {
        let idx = (focus_index(self.focus) + 1) % FOCUS_ORDER.len();
        self.focus = FOCUS_ORDER[idx];
        self.row = self.row.min(self.max_row());
    }

    /// Move focus to the previous pane
    pub fn focus_prev(&mut self) {
        let idx = (focus_index(self.focus) + FOCUS_ORDER.len() - 1) % FOCUS_ORDER.len();
        self.focus = FOCUS_ORDER[idx];
        self.row = self.row.min(self.max_row());
    }

    /// Move the cursor up a row
    pub fn select_prev(&mut self) {
        self.row = self.row.saturating_sub(1);
    }

    /// Move the cursor down a row
    pub fn select_next(&mut self) {
        self.row = (self.row + 1).min(self.max_row());
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Set a status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }
}
