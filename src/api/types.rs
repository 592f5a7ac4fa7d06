//! API request and response types.

use serde::{Deserialize, Serialize};

/// Request to talk to the booking agent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRequest {
    /// The user's message
    #[serde(default)]
    pub message: Option<serde_json::Value>,

    /// Caller-supplied user identifier, echoed back
    #[serde(default)]
    pub user_id: Option<serde_json::Value>,
}

/// The agent's reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentResponse {
    pub response: String,
    pub user_id: String,
}

/// Error body for 4xx/5xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Model used for completions
    pub model: String,
}
