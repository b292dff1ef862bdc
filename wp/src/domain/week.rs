//! The weekly planner record
//!
//! `WeeklyData` is the whole-page state: seven day columns, the weekly
//! todo list, and the memo pad. One instance exists in memory for the
//! displayed week; the durable copy lives in the week store under the
//! same `week_id` (ISO date of the week's Monday).
//!
//! The serialized shape keeps the original field casing (`weekId`,
//! `todoList`) so records written by earlier versions of the planner
//! load unchanged.

use serde::{Deserialize, Serialize};

use super::task::{Task, TaskEdit, cycle_color};

/// Fixed key for one of the seven day columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKey {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayKey {
    /// All seven keys in week order
    pub const ALL: [DayKey; 7] = [
        DayKey::Mon,
        DayKey::Tue,
        DayKey::Wed,
        DayKey::Thu,
        DayKey::Fri,
        DayKey::Sat,
        DayKey::Sun,
    ];

    /// Lowercase key string, matching the serialized field name
    pub fn as_str(self) -> &'static str {
        match self {
            DayKey::Mon => "mon",
            DayKey::Tue => "tue",
            DayKey::Wed => "wed",
            DayKey::Thu => "thu",
            DayKey::Fri => "fri",
            DayKey::Sat => "sat",
            DayKey::Sun => "sun",
        }
    }

    /// Short display label
    pub fn label(self) -> &'static str {
        match self {
            DayKey::Mon => "Mon",
            DayKey::Tue => "Tue",
            DayKey::Wed => "Wed",
            DayKey::Thu => "Thu",
            DayKey::Fri => "Fri",
            DayKey::Sat => "Sat",
            DayKey::Sun => "Sun",
        }
    }

    /// Position within the week, Monday = 0
    pub fn index(self) -> usize {
        match self {
            DayKey::Mon => 0,
            DayKey::Tue => 1,
            DayKey::Wed => 2,
            DayKey::Thu => 3,
            DayKey::Fri => 4,
            DayKey::Sat => 5,
            DayKey::Sun => 6,
        }
    }
}

/// One day column: ordered task rows plus a free-text note
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayData {
    pub tasks: Vec<Task>,
    pub note: String,
}

/// The seven day columns
///
/// A struct rather than a map: the record always has exactly these seven
/// keys, so the invariant holds by construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Days {
    pub mon: DayData,
    pub tue: DayData,
    pub wed: DayData,
    pub thu: DayData,
    pub fri: DayData,
    pub sat: DayData,
    pub sun: DayData,
}

impl Days {
    pub fn day(&self, key: DayKey) -> &DayData {
        match key {
            DayKey::Mon => &self.mon,
            DayKey::Tue => &self.tue,
            DayKey::Wed => &self.wed,
            DayKey::Thu => &self.thu,
            DayKey::Fri => &self.fri,
            DayKey::Sat => &self.sat,
            DayKey::Sun => &self.sun,
        }
    }

    pub fn day_mut(&mut self, key: DayKey) -> &mut DayData {
        match key {
            DayKey::Mon => &mut self.mon,
            DayKey::Tue => &mut self.tue,
            DayKey::Wed => &mut self.wed,
            DayKey::Thu => &mut self.thu,
            DayKey::Fri => &mut self.fri,
            DayKey::Sat => &mut self.sat,
            DayKey::Sun => &mut self.sun,
        }
    }

    /// Iterate the columns in week order
    pub fn iter(&self) -> impl Iterator<Item = (DayKey, &DayData)> {
        DayKey::ALL.iter().map(move |&key| (key, self.day(key)))
    }
}

/// The partial record produced by plan generation
///
/// Everything except `week_id`: generation replaces the page content but
/// never moves it to a different week.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPlan {
    pub days: Days,
    pub todo_list: Vec<Task>,
    pub memo: String,
}

/// Full planner state for one week
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WeeklyData {
    /// ISO date of this week's Monday; the persistence key
    pub week_id: String,
    pub days: Days,
    pub todo_list: Vec<Task>,
    pub memo: String,
}

impl WeeklyData {
    /// The empty page for a week with no stored record
    pub fn empty(week_id: impl Into<String>) -> Self {
        Self {
            week_id: week_id.into(),
            ..Self::default()
        }
    }

    /// Read the task at `index` in a day column
    ///
    /// Out-of-range reads yield a placeholder and never grow the list.
    pub fn day_task(&self, day: DayKey, index: usize) -> Task {
        task_at(&self.days.day(day).tasks, index)
    }

    /// Read the task at `index` in the todo list, placeholder-padded
    pub fn todo_task(&self, index: usize) -> Task {
        task_at(&self.todo_list, index)
    }

    /// Apply a single-field edit to a day task, padding the list through
    /// `index` with empty tasks if it is shorter
    pub fn set_day_task(&mut self, day: DayKey, index: usize, edit: TaskEdit) {
        let tasks = &mut self.days.day_mut(day).tasks;
        pad_to(tasks, index);
        tasks[index].apply(edit);
    }

    /// Apply a single-field edit to a todo task, padding as needed
    pub fn set_todo_task(&mut self, index: usize, edit: TaskEdit) {
        pad_to(&mut self.todo_list, index);
        self.todo_list[index].apply(edit);
    }

    /// Advance a day task's color one step through the cycle
    pub fn cycle_day_task_color(&mut self, day: DayKey, index: usize) {
        let current = self.day_task(day, index).color;
        self.set_day_task(day, index, TaskEdit::Color(cycle_color(current)));
    }

    /// Advance a todo task's color one step through the cycle
    pub fn cycle_todo_task_color(&mut self, index: usize) {
        let current = self.todo_task(index).color;
        self.set_todo_task(index, TaskEdit::Color(cycle_color(current)));
    }

    /// Replace a day's note
    pub fn set_note(&mut self, day: DayKey, note: impl Into<String>) {
        self.days.day_mut(day).note = note.into();
    }

    /// Replace the memo pad text
    pub fn set_memo(&mut self, memo: impl Into<String>) {
        self.memo = memo.into();
    }

    /// Replace the page content with a generated plan, keeping `week_id`
    pub fn apply_generated(&mut self, plan: GeneratedPlan) {
        self.days = plan.days;
        self.todo_list = plan.todo_list;
        self.memo = plan.memo;
    }
}

/// Read a task list at `index` without mutating it
fn task_at(tasks: &[Task], index: usize) -> Task {
    tasks.get(index).cloned().unwrap_or_else(Task::placeholder)
}

/// Grow a task list with empty tasks so `index` is addressable
fn pad_to(tasks: &mut Vec<Task>, index: usize) {
    while tasks.len() <= index {
        tasks.push(Task::empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::TaskColor;

    #[test]
    fn test_empty_week_has_seven_empty_days() {
        let week = WeeklyData::empty("2024-06-03");
        assert_eq!(week.week_id, "2024-06-03");
        for (_, day) in week.days.iter() {
            assert!(day.tasks.is_empty());
            assert!(day.note.is_empty());
        }
        assert!(week.todo_list.is_empty());
        assert!(week.memo.is_empty());
    }

    #[test]
    fn test_out_of_range_read_returns_placeholder_without_growing() {
        let week = WeeklyData::empty("2024-06-03");
        let task = week.day_task(DayKey::Wed, 5);
        assert_eq!(task.text, "");
        assert!(!task.done);
        assert_eq!(task.color, None);
        // Read paths never grow storage
        assert!(week.days.wed.tasks.is_empty());
    }

    #[test]
    fn test_write_beyond_length_pads_with_empty_tasks() {
        let mut week = WeeklyData::empty("2024-06-03");
        week.set_day_task(DayKey::Mon, 3, TaskEdit::Text("call dentist".to_string()));

        let tasks = &week.days.mon.tasks;
        assert_eq!(tasks.len(), 4);
        assert_eq!(tasks[3].text, "call dentist");
        assert!(!tasks[3].done);
        for pad in &tasks[..3] {
            assert_eq!(pad.text, "");
            assert!(!pad.done);
            assert!(!pad.id.is_empty());
        }
    }

    #[test]
    fn test_edits_preserve_sibling_data() {
        let mut week = WeeklyData::empty("2024-06-03");
        week.set_day_task(DayKey::Mon, 0, TaskEdit::Text("run".to_string()));
        week.set_day_task(DayKey::Tue, 0, TaskEdit::Text("swim".to_string()));
        week.set_note(DayKey::Mon, "rest day?");
        week.set_memo("keep going");

        week.set_day_task(DayKey::Mon, 0, TaskEdit::Done(true));

        assert_eq!(week.days.mon.tasks[0].text, "run");
        assert!(week.days.mon.tasks[0].done);
        assert_eq!(week.days.mon.note, "rest day?");
        assert_eq!(week.days.tue.tasks[0].text, "swim");
        assert_eq!(week.memo, "keep going");
    }

    #[test]
    fn test_color_cycle_on_sparse_index() {
        let mut week = WeeklyData::empty("2024-06-03");

        week.cycle_day_task_color(DayKey::Fri, 2);
        assert_eq!(week.days.fri.tasks[2].color, Some(TaskColor::Red));

        week.cycle_day_task_color(DayKey::Fri, 2);
        week.cycle_day_task_color(DayKey::Fri, 2);
        assert_eq!(week.days.fri.tasks[2].color, Some(TaskColor::Yellow));

        week.cycle_day_task_color(DayKey::Fri, 2);
        assert_eq!(week.days.fri.tasks[2].color, None);
    }

    #[test]
    fn test_todo_list_padding_and_edits() {
        let mut week = WeeklyData::empty("2024-06-03");
        week.set_todo_task(1, TaskEdit::Text("buy milk".to_string()));
        week.set_todo_task(1, TaskEdit::Done(true));

        assert_eq!(week.todo_list.len(), 2);
        assert_eq!(week.todo_list[1].text, "buy milk");
        assert!(week.todo_list[1].done);
        assert_eq!(week.todo_list[0].text, "");
    }

    #[test]
    fn test_apply_generated_preserves_week_id() {
        let mut week = WeeklyData::empty("2024-06-03");
        week.set_memo("old memo");

        let mut days = Days::default();
        days.mon.tasks.push(Task::new("exercise 30m"));
        let plan = GeneratedPlan {
            days,
            todo_list: vec![Task::new("drink water")],
            memo: "you got this".to_string(),
        };

        week.apply_generated(plan);

        assert_eq!(week.week_id, "2024-06-03");
        assert_eq!(week.days.mon.tasks[0].text, "exercise 30m");
        assert_eq!(week.todo_list[0].text, "drink water");
        assert_eq!(week.memo, "you got this");
    }

    #[test]
    fn test_serialized_shape_keeps_original_casing() {
        let mut week = WeeklyData::empty("2024-06-03");
        week.set_todo_task(0, TaskEdit::Text("x".to_string()));

        let json = serde_json::to_value(&week).unwrap();
        assert_eq!(json["weekId"], "2024-06-03");
        assert!(json["todoList"].is_array());
        assert!(json["days"]["mon"]["tasks"].is_array());
        assert!(json["days"]["sun"]["note"].is_string());
    }

    #[test]
    fn test_deserialize_fills_missing_fields() {
        // A minimal legacy record: absent days/todoList/memo come back as
        // the empty defaults instead of failing the load.
        let week: WeeklyData = serde_json::from_str(r#"{"weekId":"2024-06-03"}"#).unwrap();
        assert_eq!(week.week_id, "2024-06-03");
        assert!(week.days.mon.tasks.is_empty());
        assert!(week.todo_list.is_empty());
    }
}
