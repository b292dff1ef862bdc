//! Week plan generation
//!
//! One-shot transformation of a natural-language goal into a structured
//! week plan. The model is forced to call a single tool whose input
//! schema fixes the output shape: an array of short task strings per day,
//! a todo list, and a memo. The parse fails closed - either the whole
//! response maps onto a [`GeneratedPlan`] or nothing is returned.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use super::error::PlanError;
use crate::config::LlmConfig;
use crate::domain::{DayData, DayKey, Days, GeneratedPlan, Task};
use crate::llm::{self, CompletionRequest, LlmClient, Message, ToolDefinition};

/// Name of the forced tool that carries the structured plan
const PLAN_TOOL_NAME: &str = "submit_week_plan";

/// Max tokens for one generation response
const PLAN_MAX_TOKENS: u32 = 2048;

/// Generates week plans through an injected LLM client
///
/// The credential is resolved when the generator is constructed, not
/// looked up ambiently at call time: a missing key surfaces once, as a
/// `Configuration` error, and the rest of the planner keeps working.
pub struct PlanGenerator {
    llm: Arc<dyn LlmClient>,
}

impl PlanGenerator {
    /// Create a generator with an explicit client (tests inject mocks here)
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    /// Create a generator from LLM configuration
    pub fn from_config(config: &LlmConfig) -> Result<Self, PlanError> {
        let llm = llm::create_client(config).map_err(|e| PlanError::Configuration(e.to_string()))?;
        Ok(Self::new(llm))
    }

    /// Generate a plan for the week starting at `week_start` from a goal
    ///
    /// Exactly one outbound request, no retries. `goal` is assumed
    /// non-empty; the caller's submit control enforces that.
    pub async fn generate(&self, goal: &str, week_start: &str) -> Result<GeneratedPlan, PlanError> {
        debug!(goal_len = goal.len(), week_start, "generate: called");

        let request = CompletionRequest {
            system_prompt: system_prompt(week_start),
            messages: vec![Message::user(format!("Create a weekly plan for this goal: \"{}\"", goal))],
            tools: vec![plan_tool()],
            tool_choice: Some(PLAN_TOOL_NAME.to_string()),
            max_tokens: PLAN_MAX_TOKENS,
        };

        let response = self.llm.complete(request).await.map_err(PlanError::from)?;

        let payload = extract_payload(&response.tool_calls, response.content.as_deref())?;
        Ok(payload.into_plan())
    }
}

fn system_prompt(week_start: &str) -> String {
    format!(
        "You are an expert weekly planning assistant. \
         Take the user's high-level goal or schedule requirements and convert them \
         into a realistic, actionable weekly plan.\n\n\
         The user is planning for the week starting on {week_start} (a Monday).\n\n\
         Call the {PLAN_TOOL_NAME} tool with a list of short task strings for each \
         day (mon-sun), a general todo list for the week, and a memo with any \
         motivational note. Keep tasks concise (under 5 words preferably) so they \
         fit a paper planner layout. At most 6 tasks per day."
    )
}

fn plan_tool() -> ToolDefinition {
    let day_tasks = serde_json::json!({
        "type": "array",
        "items": { "type": "string" }
    });

    ToolDefinition::new(
        PLAN_TOOL_NAME,
        "Submit the structured weekly plan",
        serde_json::json!({
            "type": "object",
            "properties": {
                "mon": day_tasks,
                "tue": day_tasks,
                "wed": day_tasks,
                "thu": day_tasks,
                "fri": day_tasks,
                "sat": day_tasks,
                "sun": day_tasks,
                "todoList": day_tasks,
                "memo": { "type": "string" }
            },
            "required": ["mon", "tue", "wed", "thu", "fri", "sat", "sun", "todoList", "memo"]
        }),
    )
}

/// The schema-constrained response payload
///
/// Every field is required: a response missing any day key, the todo
/// list, or the memo fails deserialization and nothing partial leaks out.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanPayload {
    mon: Vec<String>,
    tue: Vec<String>,
    wed: Vec<String>,
    thu: Vec<String>,
    fri: Vec<String>,
    sat: Vec<String>,
    sun: Vec<String>,
    todo_list: Vec<String>,
    memo: String,
}

impl PlanPayload {
    fn day(&self, key: DayKey) -> &[String] {
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

    /// Turn the raw strings into fresh tasks, preserving array order
    fn into_plan(self) -> GeneratedPlan {
        let mut days = Days::default();
        for key in DayKey::ALL {
            *days.day_mut(key) = DayData {
                tasks: to_tasks(self.day(key)),
                note: String::new(),
            };
        }

        GeneratedPlan {
            todo_list: to_tasks(&self.todo_list),
            memo: self.memo,
            days,
        }
    }
}

fn to_tasks(texts: &[String]) -> Vec<Task> {
    texts.iter().map(|text| Task::new(text.as_str())).collect()
}

/// Pull the plan payload out of a completion response, failing closed
fn extract_payload(tool_calls: &[llm::ToolCall], content: Option<&str>) -> Result<PlanPayload, PlanError> {
    if let Some(call) = tool_calls.iter().find(|c| c.name == PLAN_TOOL_NAME) {
        return serde_json::from_value(call.input.clone())
            .map_err(|e| PlanError::Format(format!("plan tool input did not match schema: {}", e)));
    }

    // The forced tool should always answer; a plain-text JSON body is
    // accepted as a fallback before giving up.
    match content {
        Some(text) if !text.trim().is_empty() => {
            debug!("extract_payload: no tool call, trying text body");
            serde_json::from_str(text).map_err(|e| PlanError::Format(format!("response text was not a plan: {}", e)))
        }
        _ => Err(PlanError::Format("empty response from model".to_string())),
    }
}
