//! Tool catalog and dispatcher.
//!
//! Every tool is a [`ToolKind`] variant. The same variant yields the schema
//! advertised to the model and selects the handler that runs, so the two can
//! never disagree.

mod hotels;

use std::sync::Arc;

use serde_json::{json, Value};
use thiserror::Error;

use crate::llm::ToolSchema;
use crate::store::{DomainError, HotelStore};

pub use hotels::{BookHotelArgs, SearchHotelsArgs};

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: &'static str, message: String },

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Failed to encode tool output: {0}")]
    Output(#[from] serde_json::Error),
}

/// The tools the agent can call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    SearchHotels,
    BookHotel,
}

impl ToolKind {
    pub const ALL: [ToolKind; 2] = [ToolKind::SearchHotels, ToolKind::BookHotel];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::SearchHotels => "searchHotels",
            ToolKind::BookHotel => "bookHotel",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn definition(self) -> ToolDefinition {
        match self {
            ToolKind::SearchHotels => hotels::search_definition(),
            ToolKind::BookHotel => hotels::book_definition(),
        }
    }
}

/// Name, description and JSON Schema of one tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

impl ToolDefinition {
    pub fn to_schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name.to_string(),
            description: self.description.to_string(),
            parameters: self.input_schema.clone(),
        }
    }
}

/// Outcome of one tool call, as fed back to the model.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolResult {
    Success(Value),
    Error(String),
}

impl ToolResult {
    /// JSON text placed in the tool message of the transcript.
    pub fn to_content(&self) -> String {
        match self {
            ToolResult::Success(value) => value.to_string(),
            ToolResult::Error(message) => json!({ "error": message }).to_string(),
        }
    }
}

/// Registry of callable tools bound to the hotel store.
#[derive(Clone)]
pub struct ToolRegistry {
    store: Arc<HotelStore>,
}

impl ToolRegistry {
    pub fn new(store: Arc<HotelStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<HotelStore> {
        &self.store
    }

    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        ToolKind::ALL.iter().map(|kind| kind.definition()).collect()
    }

    /// Tool descriptors for the completion request.
    pub fn get_tool_schemas(&self) -> Vec<ToolSchema> {
        self.list_tools().iter().map(ToolDefinition::to_schema).collect()
    }

    /// Run `name` with its raw JSON argument string.
    ///
    /// Never fails: unknown tools, undecodable arguments and domain errors all
    /// come back as [`ToolResult::Error`].
    pub async fn execute(&self, name: &str, raw_arguments: &str) -> ToolResult {
        tracing::debug!(tool = name, args = raw_arguments, "Executing tool");

        match self.dispatch(name, raw_arguments).await {
            Ok(output) => {
                tracing::debug!(tool = name, result = %output, "Tool succeeded");
                ToolResult::Success(output)
            }
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "Tool failed");
                ToolResult::Error(e.to_string())
            }
        }
    }

    async fn dispatch(&self, name: &str, raw_arguments: &str) -> Result<Value, ToolError> {
        let kind =
            ToolKind::from_name(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        match kind {
            ToolKind::SearchHotels => {
                hotels::search_hotels(&self.store, decode(kind, raw_arguments)?)
            }
            ToolKind::BookHotel => {
                hotels::book_hotel(&self.store, decode(kind, raw_arguments)?).await
            }
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(kind: ToolKind, raw: &str) -> Result<T, ToolError> {
    serde_json::from_str(raw).map_err(|e| ToolError::InvalidArguments {
        tool: kind.name(),
        message: e.to_string(),
    })
}
