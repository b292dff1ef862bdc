//! Integration tests for weekplan
//!
//! These tests verify end-to-end behavior across the domain model, the
//! week store, and plan generation (against a mock LLM client).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use weekplan::domain::{DayKey, TaskEdit, WeeklyData, dates};
use weekplan::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, StopReason, TokenUsage, ToolCall};
use weekplan::plan::{PlanError, PlanGenerator};
use weekstore::{DebouncedSaver, WeekStore};

/// Mock LLM client returning one canned result
struct CannedLlm {
    result: std::sync::Mutex<Option<Result<CompletionResponse, LlmError>>>,
}

impl CannedLlm {
    fn new(result: Result<CompletionResponse, LlmError>) -> Self {
        Self {
            result: std::sync::Mutex::new(Some(result)),
        }
    }

    fn plan_response(input: serde_json::Value) -> CompletionResponse {
        CompletionResponse {
            content: None,
            tool_calls: vec![ToolCall {
                id: "tu_1".to_string(),
                name: "submit_week_plan".to_string(),
                input,
            }],
            stop_reason: StopReason::ToolUse,
            usage: TokenUsage::default(),
        }
    }
}

#[async_trait]
impl LlmClient for CannedLlm {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.result
            .lock()
            .expect("mock lock")
            .take()
            .unwrap_or_else(|| Err(LlmError::InvalidResponse("mock exhausted".to_string())))
    }
}

// =============================================================================
// Persistence Tests
// =============================================================================

#[test]
fn test_week_round_trip_is_deep_equal() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store: WeekStore<WeeklyData> = WeekStore::open(dir.path()).expect("Failed to open store");

    let mut week = WeeklyData::empty("2024-06-03");
    week.set_day_task(DayKey::Mon, 0, TaskEdit::Text("운동 30분".to_string()));
    week.set_day_task(DayKey::Mon, 0, TaskEdit::Done(true));
    week.cycle_day_task_color(DayKey::Mon, 0);
    week.set_note(DayKey::Wed, "midweek check-in");
    week.set_todo_task(2, TaskEdit::Text("buy groceries".to_string()));
    week.set_memo("stay hydrated");

    store.save("2024-06-03", &week).expect("Failed to save");
    let loaded = store.load("2024-06-03").expect("Failed to load").expect("record present");

    assert_eq!(loaded, week);
}

#[test]
fn test_missing_week_falls_back_to_empty_default() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store: WeekStore<WeeklyData> = WeekStore::open(dir.path()).expect("Failed to open store");

    let data = store
        .load("2024-06-03")
        .expect("load should not fail")
        .unwrap_or_else(|| WeeklyData::empty("2024-06-03"));

    assert_eq!(data.week_id, "2024-06-03");
    assert!(data.todo_list.is_empty());
}

#[test]
fn test_corrupt_record_falls_back_to_empty_default() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store: WeekStore<WeeklyData> = WeekStore::open(dir.path()).expect("Failed to open store");

    std::fs::write(dir.path().join("2024-06-03.json"), "{\"weekId\": 13, oops").expect("write corrupt blob");

    let data = store
        .load("2024-06-03")
        .expect("corrupt record must not error")
        .unwrap_or_else(|| WeeklyData::empty("2024-06-03"));

    assert_eq!(data, WeeklyData::empty("2024-06-03"));
}

#[test]
fn test_debounced_edits_collapse_into_last_value() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store: WeekStore<WeeklyData> = WeekStore::open(dir.path()).expect("Failed to open store");
    let mut saver = DebouncedSaver::new(store, Duration::from_millis(50));

    let mut week = WeeklyData::empty("2024-06-03");
    week.set_memo("first");
    saver.schedule("2024-06-03", week.clone());
    week.set_memo("second");
    saver.schedule("2024-06-03", week.clone());

    // Not yet durable
    assert!(saver.store().load("2024-06-03").unwrap().is_none());

    std::thread::sleep(Duration::from_millis(80));
    assert_eq!(saver.poll().unwrap(), Some("2024-06-03".to_string()));

    let loaded = saver.store().load("2024-06-03").unwrap().unwrap();
    assert_eq!(loaded.memo, "second");
}

#[test]
fn test_flush_then_navigate_keeps_weeks_separate() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store: WeekStore<WeeklyData> = WeekStore::open(dir.path()).expect("Failed to open store");
    let mut saver = DebouncedSaver::new(store, Duration::from_millis(50));

    // Edit week A, flush on navigation, then edit week B
    let mut week_a = WeeklyData::empty("2024-06-03");
    week_a.set_memo("week a memo");
    saver.schedule("2024-06-03", week_a);
    saver.flush().expect("flush");

    let mut week_b = WeeklyData::empty("2024-06-10");
    week_b.set_memo("week b memo");
    saver.schedule("2024-06-10", week_b);
    saver.flush().expect("flush");

    let a = saver.store().load("2024-06-03").unwrap().unwrap();
    let b = saver.store().load("2024-06-10").unwrap().unwrap();
    assert_eq!(a.memo, "week a memo");
    assert_eq!(a.week_id, "2024-06-03");
    assert_eq!(b.memo, "week b memo");
}

// =============================================================================
// Plan Generation Tests
// =============================================================================

fn full_payload() -> serde_json::Value {
    serde_json::json!({
        "mon": ["운동 30분"],
        "tue": [],
        "wed": [],
        "thu": [],
        "fri": [],
        "sat": [],
        "sun": [],
        "todoList": ["물 마시기"],
        "memo": "힘내자"
    })
}

#[tokio::test]
async fn test_generation_fills_week_and_preserves_week_id() {
    let llm = Arc::new(CannedLlm::new(Ok(CannedLlm::plan_response(full_payload()))));
    let generator = PlanGenerator::new(llm);

    let mut week = WeeklyData::empty("2024-06-03");
    let plan = generator
        .generate("운동하기", "2024-06-03")
        .await
        .expect("generation should succeed");
    week.apply_generated(plan);

    assert_eq!(week.week_id, "2024-06-03");
    assert_eq!(week.days.mon.tasks.len(), 1);
    assert_eq!(week.days.mon.tasks[0].text, "운동 30분");
    assert!(!week.days.mon.tasks[0].done);
    assert_eq!(week.todo_list.len(), 1);
    assert_eq!(week.todo_list[0].text, "물 마시기");
    assert_eq!(week.memo, "힘내자");
}

#[tokio::test]
async fn test_generation_failure_leaves_state_untouched() {
    let mut payload = full_payload();
    payload.as_object_mut().unwrap().remove("sun");
    let llm = Arc::new(CannedLlm::new(Ok(CannedLlm::plan_response(payload))));
    let generator = PlanGenerator::new(llm);

    let mut week = WeeklyData::empty("2024-06-03");
    week.set_memo("precious edits");
    let before = week.clone();

    let err = generator.generate("운동하기", "2024-06-03").await.unwrap_err();
    assert!(matches!(err, PlanError::Format(_)));

    // Nothing partial was applied
    assert_eq!(week, before);
}

#[tokio::test]
async fn test_generated_plan_persists_through_store() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store: WeekStore<WeeklyData> = WeekStore::open(dir.path()).expect("Failed to open store");

    let llm = Arc::new(CannedLlm::new(Ok(CannedLlm::plan_response(full_payload()))));
    let generator = PlanGenerator::new(llm);

    let week_id = "2024-06-03";
    let mut week = store
        .load(week_id)
        .unwrap()
        .unwrap_or_else(|| WeeklyData::empty(week_id));
    let plan = generator.generate("운동하기", week_id).await.unwrap();
    week.apply_generated(plan);
    store.save(week_id, &week).unwrap();

    let loaded = store.load(week_id).unwrap().unwrap();
    assert_eq!(loaded, week);
    assert_eq!(loaded.days.mon.tasks[0].text, "운동 30분");
}

// =============================================================================
// Date Property Tests
// =============================================================================

#[test]
fn test_week_id_is_always_a_monday() {
    let start = dates::parse_iso("2024-01-01").unwrap();
    for offset in 0..60 {
        let day = start.checked_add_days(chrono::Days::new(offset)).unwrap();
        let monday = dates::monday_of(day);
        // Idempotent and stable across the whole week
        assert_eq!(dates::monday_of(monday), monday);
        assert_eq!(dates::week_dates(monday)[0], monday);
    }
}
