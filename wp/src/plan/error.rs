//! Plan generation error types

use thiserror::Error;

use crate::llm::LlmError;

/// Errors that can occur while generating a week plan
///
/// The three kinds stay distinct internally even though the planner UI
/// reduces them all to a single notice: Configuration means the feature
/// cannot run at all, Transport means the request never produced a
/// usable response, Format means a response arrived but failed the
/// schema contract.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Plan generation is not configured: {0}")]
    Configuration(String),

    #[error("Plan request failed: {0}")]
    Transport(#[source] LlmError),

    #[error("Plan response was malformed: {0}")]
    Format(String),
}

impl From<LlmError> for PlanError {
    fn from(err: LlmError) -> Self {
        if err.is_transport() {
            PlanError::Transport(err)
        } else {
            PlanError::Format(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors_map_to_transport() {
        let err: PlanError = LlmError::ApiError {
            status: 503,
            message: "overloaded".to_string(),
        }
        .into();
        assert!(matches!(err, PlanError::Transport(_)));
    }

    #[test]
    fn test_decode_errors_map_to_format() {
        let err: PlanError = LlmError::InvalidResponse("not json".to_string()).into();
        assert!(matches!(err, PlanError::Format(_)));
    }
}
