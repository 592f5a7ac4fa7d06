//! Core agent loop implementation.

use std::sync::Arc;

use crate::config::Config;
use crate::llm::{ChatMessage, ChatResponse, FinishReason, LlmClient, OpenAiClient, ToolCall};
use crate::store::HotelStore;
use crate::tools::ToolRegistry;

use super::prompt::build_system_prompt;

/// Returned when the model stops without saying anything.
pub const FALLBACK_READY: &str = "Booking assistant ready to help.";

/// Returned when the model answers without tool calls or a stop signal, but with no text.
pub const FALLBACK_ASSIST: &str = "I'm ready to assist with hotel bookings.";

/// Returned once the conversation asks for more tool calls than allowed.
pub const TOOL_BUDGET_EXHAUSTED: &str = "I've reached the maximum number of tool calls.";

/// Ordered, append-only message history for one user request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new(system_prompt: String, user_message: &str) -> Self {
        Self {
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_message),
            ],
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn into_messages(self) -> Vec<ChatMessage> {
        self.messages
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The model produced a final answer.
    Completed,
    /// The tool-call cap was hit before the model finished.
    ToolBudgetExhausted,
}

/// Result of handling one user message.
#[derive(Debug, Clone)]
pub struct AgentRun {
    pub response: String,
    pub outcome: RunOutcome,
    /// Completion requests made.
    pub steps: usize,
    /// Tool calls executed.
    pub tool_calls: usize,
    pub transcript: Transcript,
}

enum LoopState {
    AwaitingCompletion,
    ExecutingTools(Vec<ToolCall>),
    Done(String),
    Aborted,
}

/// The booking agent.
pub struct Agent {
    config: Config,
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
}

impl Agent {
    /// Create an agent backed by the OpenAI-compatible client from `config`.
    pub fn new(config: Config, store: Arc<HotelStore>) -> anyhow::Result<Self> {
        let llm = Arc::new(OpenAiClient::from_config(&config)?);
        Ok(Self::with_client(config, llm, store))
    }

    /// Create an agent with a caller-supplied completion client.
    pub fn with_client(config: Config, llm: Arc<dyn LlmClient>, store: Arc<HotelStore>) -> Self {
        Self {
            config,
            llm,
            tools: ToolRegistry::new(store),
        }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Handle one user message and return the assistant's final reply.
    ///
    /// Only a failed completion request is an error; tool failures are fed
    /// back to the model, and hitting the tool-call cap ends the run with
    /// [`TOOL_BUDGET_EXHAUSTED`].
    pub async fn run(&self, user_message: &str) -> anyhow::Result<AgentRun> {
        tracing::info!("Agent starting with message: {}", truncate_for_log(user_message, 200));

        let system_prompt = build_system_prompt(&self.tools);
        let mut transcript = Transcript::new(system_prompt, user_message);
        let tool_schemas = self.tools.get_tool_schemas();

        let mut steps = 0usize;
        let mut tool_calls = 0usize;
        let mut state = LoopState::AwaitingCompletion;

        loop {
            state = match state {
                LoopState::AwaitingCompletion => {
                    steps += 1;
                    tracing::debug!("Agent step {}", steps);

                    let response = self
                        .llm
                        .chat_completion(
                            &self.config.default_model,
                            transcript.messages(),
                            Some(&tool_schemas),
                        )
                        .await?;

                    tracing::debug!(finish_reason = ?response.finish_reason, "LLM responded");
                    next_state(response, &mut transcript)
                }
                LoopState::ExecutingTools(calls) => {
                    self.execute_tool_calls(calls, &mut transcript, &mut tool_calls)
                        .await
                }
                LoopState::Done(response) => {
                    tracing::info!(
                        steps,
                        tool_calls,
                        "Agent completed: {}",
                        truncate_for_log(&response, 200)
                    );
                    return Ok(AgentRun {
                        response,
                        outcome: RunOutcome::Completed,
                        steps,
                        tool_calls,
                        transcript,
                    });
                }
                LoopState::Aborted => {
                    tracing::warn!(
                        steps,
                        max_tool_calls = self.config.max_tool_calls,
                        "Agent stopped: tool call budget exhausted"
                    );
                    return Ok(AgentRun {
                        response: TOOL_BUDGET_EXHAUSTED.to_string(),
                        outcome: RunOutcome::ToolBudgetExhausted,
                        steps,
                        tool_calls: self.config.max_tool_calls,
                        transcript,
                    });
                }
            };
        }
    }

    /// Execute one batch of tool calls in the order the model emitted them.
    async fn execute_tool_calls(
        &self,
        calls: Vec<ToolCall>,
        transcript: &mut Transcript,
        tool_calls: &mut usize,
    ) -> LoopState {
        for call in calls {
            if !call.is_function() {
                tracing::debug!(call_type = %call.call_type, "Skipping non-function tool call");
                continue;
            }

            *tool_calls += 1;
            if *tool_calls > self.config.max_tool_calls {
                return LoopState::Aborted;
            }

            tracing::info!(
                "Calling tool: {} with args: {}",
                call.function.name,
                truncate_for_log(&call.function.arguments, 500)
            );

            let result = self
                .tools
                .execute(&call.function.name, &call.function.arguments)
                .await;
            transcript.push(ChatMessage::tool(call.id, result.to_content()));
        }

        LoopState::AwaitingCompletion
    }
}

/// Decide what follows a completion. Tool calls win over a stop signal.
fn next_state(response: ChatResponse, transcript: &mut Transcript) -> LoopState {
    let ChatResponse {
        finish_reason,
        message,
        ..
    } = response;

    let Some(message) = message else {
        return LoopState::Done(FALLBACK_READY.to_string());
    };

    let tool_calls = message.tool_calls.unwrap_or_default();
    if tool_calls.is_empty() {
        let fallback = if finish_reason == Some(FinishReason::Stop) {
            FALLBACK_READY
        } else {
            FALLBACK_ASSIST
        };
        let text = message
            .content
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        return LoopState::Done(text);
    }

    transcript.push(ChatMessage::assistant(message.content, tool_calls.clone()));
    LoopState::ExecutingTools(tool_calls)
}

/// Truncate a string for logging purposes.
fn truncate_for_log(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... [truncated]", &s[..end])
}
