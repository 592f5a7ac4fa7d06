//! Agent module - the conversation driver.
//!
//! The agent follows a "tools in a loop" pattern:
//! 1. Seed the transcript with the system prompt and the user's message
//! 2. Call the LLM with the hotel tools
//! 3. If the LLM requests tool calls, execute them in order and feed results back
//! 4. Repeat until the LLM answers in text or the tool-call budget is spent

mod agent_loop;
mod prompt;

pub use agent_loop::{
    Agent, AgentRun, RunOutcome, Transcript, FALLBACK_ASSIST, FALLBACK_READY,
    TOOL_BUDGET_EXHAUSTED,
};
pub use prompt::build_system_prompt;
