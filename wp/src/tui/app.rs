//! TUI application - event handling and state management
//!
//! The App struct owns the AppState and handles all keyboard events.
//! It does not do any rendering - that's delegated to the views module.
//! Side effects (loads, saves, generation) are requested through
//! `PendingAction` and performed by the runner.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{AppState, Focus, InteractionMode, PendingAction};
use crate::domain::TaskEdit;
use crate::domain::dates;

/// TUI application
#[derive(Debug)]
pub struct App {
    /// Application state
    state: AppState,
}

impl App {
    /// Create an application showing the given week
    pub fn new(week_id: impl Into<String>) -> Self {
        Self {
            state: AppState::new(week_id),
        }
    }

    /// Get reference to state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get mutable reference to state
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Clear any transient messages on key press
        self.state.clear_error();
        self.state.status_message = None;

        match self.state.mode.clone() {
            InteractionMode::Normal => self.handle_normal_key(key),
            InteractionMode::EditTask(buffer) => self.handle_edit_key(key, buffer, EditTarget::Task),
            InteractionMode::EditNote(buffer) => self.handle_edit_key(key, buffer, EditTarget::Note),
            InteractionMode::EditMemo(buffer) => self.handle_edit_key(key, buffer, EditTarget::Memo),
            InteractionMode::GoalPrompt(buffer) => self.handle_goal_key(key, buffer),
            InteractionMode::Help => self.handle_help_key(key),
        }
    }

    /// Handle key in normal mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            // === Quit ===
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                return true; // Force quit
            }
            (KeyCode::Char('q'), _) => {
                self.state.should_quit = true;
            }

            // === Help ===
            (KeyCode::Char('?'), _) | (KeyCode::F(1), _) => {
                self.state.mode = InteractionMode::Help;
            }

            // === Pane navigation ===
            (KeyCode::Left, _) | (KeyCode::Char('h'), _) | (KeyCode::BackTab, _) => {
                self.state.focus_prev();
            }
            (KeyCode::Right, _) | (KeyCode::Char('l'), _) | (KeyCode::Tab, _) => {
                self.state.focus_next();
            }
            (KeyCode::Char('m'), _) => {
                self.state.focus = Focus::Memo;
                self.state.row = 0;
            }

            // === Row navigation ===
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) => {
                self.state.select_prev();
            }
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) => {
                self.state.select_next();
            }

            // === Week navigation ===
            (KeyCode::Char('['), _) => {
                self.change_week(-1);
            }
            (KeyCode::Char(']'), _) => {
                self.change_week(1);
            }
            (KeyCode::Char('t'), _) => {
                let today = dates::current_week_id();
                if today != self.state.week_id {
                    self.state.pending_action = Some(PendingAction::LoadWeek(today));
                }
            }

            // === Editing ===
            (KeyCode::Enter, _) | (KeyCode::Char('i'), _) => {
                self.begin_edit();
            }
            (KeyCode::Char(' '), _) => {
                self.state.toggle_selected_done();
            }
            (KeyCode::Char('c'), _) => {
                self.state.cycle_selected_color();
            }
            (KeyCode::Char('o'), _) => {
                if let Focus::Day(day) = self.state.focus {
                    let note = self.state.data.days.day(day).note.clone();
                    self.state.mode = InteractionMode::EditNote(note);
                }
            }

            // === Smart plan ===
            (KeyCode::Char('g'), _) => {
                self.state.mode = InteractionMode::GoalPrompt(String::new());
            }

            _ => {}
        }

        false
    }

    /// Open the text editor for the thing under the cursor
    fn begin_edit(&mut self) {
        match self.state.focus {
            Focus::Memo => {
                self.state.mode = InteractionMode::EditMemo(self.state.data.memo.clone());
            }
            Focus::Day(_) | Focus::Todo => {
                let text = self.state.selected_task().map(|t| t.text).unwrap_or_default();
                self.state.mode = InteractionMode::EditTask(text);
            }
        }
    }

    /// Handle key while editing a text buffer
    fn handle_edit_key(&mut self, key: KeyEvent, mut buffer: String, target: EditTarget) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.state.mode = InteractionMode::Normal;
            }
            KeyCode::Enter => {
                match target {
                    EditTarget::Task => self.state.edit_selected_task(TaskEdit::Text(buffer)),
                    EditTarget::Note => self.state.set_selected_note(buffer),
                    EditTarget::Memo => self.state.set_memo(buffer),
                }
                self.state.mode = InteractionMode::Normal;
            }
            KeyCode::Backspace => {
                buffer.pop();
                self.set_edit_buffer(buffer, target);
            }
            KeyCode::Char(c) => {
                buffer.push(c);
                self.set_edit_buffer(buffer, target);
            }
            _ => {}
        }

        false
    }

    fn set_edit_buffer(&mut self, buffer: String, target: EditTarget) {
        self.state.mode = match target {
            EditTarget::Task => InteractionMode::EditTask(buffer),
            EditTarget::Note => InteractionMode::EditNote(buffer),
            EditTarget::Memo => InteractionMode::EditMemo(buffer),
        };
    }

    /// Handle key in the smart-plan goal dialog
    fn handle_goal_key(&mut self, key: KeyEvent, mut buffer: String) -> bool {
        // While a request is in flight the input is locked; Esc puts the
        // dialog away but the request itself is not cancellable.
        if self.state.generating {
            if key.code == KeyCode::Esc {
                self.state.mode = InteractionMode::Normal;
            }
            return false;
        }

        match key.code {
            KeyCode::Esc => {
                self.state.mode = InteractionMode::Normal;
            }
            KeyCode::Enter => {
                let goal = buffer.trim().to_string();
                // Submit is a no-op while the goal is empty
                if !goal.is_empty() {
                    self.state.generating = true;
                    self.state.pending_action = Some(PendingAction::Generate(goal));
                }
            }
            KeyCode::Backspace => {
                buffer.pop();
                self.state.mode = InteractionMode::GoalPrompt(buffer);
            }
            KeyCode::Char(c) => {
                buffer.push(c);
                self.state.mode = InteractionMode::GoalPrompt(buffer);
            }
            _ => {}
        }

        false
    }

    /// Handle key in help overlay
    fn handle_help_key(&mut self, key: KeyEvent) -> bool {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')) {
            self.state.mode = InteractionMode::Normal;
        }
        false
    }

    /// Queue navigation to the week `offset` weeks away
    fn change_week(&mut self, offset: i64) {
        let Ok(monday) = dates::parse_iso(&self.state.week_id) else {
            return;
        };
        let target = dates::iso_date(dates::shift_weeks(monday, offset));
        self.state.pending_action = Some(PendingAction::LoadWeek(target));
    }
}

/// What an edit buffer commits to
#[derive(Debug, Clone, Copy)]
enum EditTarget {
    Task,
    Note,
    Memo,
}
