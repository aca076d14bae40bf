use serde::{Deserialize, Serialize};

/// Uniform response envelope for write operations.
///
/// Produced fresh per request; `id` is the affected record id when known.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult {
    pub id: Option<i64>,
    pub success: bool,
    pub message: String,
}

impl CommandResult {
    pub fn ok(id: Option<i64>, message: impl Into<String>) -> Self {
        Self {
            id,
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            id: None,
            success: false,
            message: message.into(),
        }
    }
}

/// Error response body for server-side failures.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
