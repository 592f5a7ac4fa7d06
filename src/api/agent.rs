//! Conversation endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use super::routes::AppState;
use super::types::{AgentRequest, AgentResponse, ErrorResponse};

type ApiError = (StatusCode, Json<ErrorResponse>);

/// POST /api/agent - Send one user message to the booking agent.
pub async fn post_agent(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AgentRequest>, JsonRejection>,
) -> Result<Json<AgentResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| bad_request(e.body_text()))?;
    let message = required_string(request.message, "message")?;
    let user_id = required_string(request.user_id, "userId")?;

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("agent_request", %request_id, %user_id);

    async move {
        tracing::info!("Request: {}", message);

        match state.agent.run(&message).await {
            Ok(run) => {
                tracing::info!(
                    steps = run.steps,
                    tool_calls = run.tool_calls,
                    outcome = ?run.outcome,
                    "Response: {}",
                    run.response
                );
                Ok(Json(AgentResponse {
                    response: run.response,
                    user_id,
                }))
            }
            Err(e) => {
                tracing::error!("Agent failed: {:#}", e);
                Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "Internal server error".to_string(),
                        details: Some(format!("{:#}", e)),
                    }),
                ))
            }
        }
    }
    .instrument(span)
    .await
}

fn required_string(value: Option<Value>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Ok(s),
        _ => Err(bad_request(format!("Missing or invalid '{}' field", field))),
    }
}

fn bad_request(message: String) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message,
            details: None,
        }),
    )
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request},
        Router,
    };
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::agent::Agent;
    use crate::api::routes::router;
    use crate::config::Config;
    use crate::llm::{
        AssistantReply, ChatMessage, ChatResponse, FinishReason, LlmClient, ToolSchema,
    };
    use crate::store::HotelStore;

    /// Answers every completion with the same text, or fails if none given.
    struct FixedLlm(Option<&'static str>);

    #[async_trait]
    impl LlmClient for FixedLlm {
        async fn chat_completion(
            &self,
            _model: &str,
            _messages: &[ChatMessage],
            _tools: Option<&[ToolSchema]>,
        ) -> anyhow::Result<ChatResponse> {
            match self.0 {
                Some(text) => Ok(ChatResponse {
                    finish_reason: Some(FinishReason::Stop),
                    message: Some(AssistantReply::text(text)),
                    usage: None,
                }),
                None => Err(anyhow::anyhow!("Completion service returned 502 Bad Gateway")),
            }
        }
    }

    fn app(llm: FixedLlm) -> Router {
        let config = Config::new("test-key");
        let agent = Agent::with_client(
            config.clone(),
            Arc::new(llm),
            Arc::new(HotelStore::default()),
        );
        router(Arc::new(AppState::new(config, agent)))
    }

    async fn post(app: Router, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/agent")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn returns_agent_reply_with_user_id() {
        let (status, body) = post(
            app(FixedLlm(Some("Which dates?"))),
            r#"{"message":"Find me a hotel","userId":"u1"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"response": "Which dates?", "userId": "u1"}));
    }

    #[tokio::test]
    async fn rejects_missing_message() {
        let (status, body) = post(app(FixedLlm(Some("unused"))), r#"{"userId":"u1"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing or invalid 'message' field");
    }

    #[tokio::test]
    async fn rejects_empty_or_non_string_user_id() {
        for body in [
            r#"{"message":"hi","userId":""}"#,
            r#"{"message":"hi","userId":42}"#,
        ] {
            let (status, body) = post(app(FixedLlm(Some("unused"))), body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "Missing or invalid 'userId' field");
        }
    }

    #[tokio::test]
    async fn rejects_malformed_json() {
        let (status, body) = post(app(FixedLlm(Some("unused"))), "{message:").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn completion_failure_is_server_error_with_details() {
        let (status, body) = post(
            app(FixedLlm(None)),
            r#"{"message":"hi","userId":"u1"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert!(body["details"]
            .as_str()
            .is_some_and(|d| d.contains("502 Bad Gateway")));
    }

    #[tokio::test]
    async fn health_reports_model() {
        let response = app(FixedLlm(None))
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let body: Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body["status"], "ok");
        assert_eq!(body["model"], "gpt-4-turbo");
    }
}
