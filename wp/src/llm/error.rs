//! LLM error types

use thiserror::Error;

/// Errors that can occur during LLM operations
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// Whether the failure happened before a response could be decoded
    ///
    /// Transport-level failures (connection, HTTP status) are distinct
    /// from a response that arrived but could not be understood; callers
    /// surface them under different error kinds.
    pub fn is_transport(&self) -> bool {
        matches!(self, LlmError::ApiError { .. } | LlmError::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_transport() {
        assert!(
            LlmError::ApiError {
                status: 500,
                message: "Server error".to_string()
            }
            .is_transport()
        );

        assert!(!LlmError::InvalidResponse("Bad JSON".to_string()).is_transport());
    }

    #[test]
    fn test_error_display() {
        let err = LlmError::ApiError {
            status: 401,
            message: "unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "API error 401: unauthorized");
    }
}
