//! Assembled provider responses.

use serde::{Deserialize, Serialize};

use super::Role;

/// A tool invocation the agent emitted while producing its response.
///
/// Surfaced as metadata only: this layer never executes a tool call or
/// re-submits it to the agent. `arguments` holds the JSON-serialized tool
/// input exactly as emitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolCall {
    pub name: String,
    pub arguments: String,
}

/// The structured response shape shared with sibling backends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LlmResponse {
    pub content: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl LlmResponse {
    /// A plain assistant response with no tool calls.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role: Role::Assistant,
            tool_calls: None,
        }
    }
}

/// A provider reply: bare text, or the structured form.
///
/// The structured form is produced only when the agent emitted at least
/// one tool invocation; otherwise the reply degrades to bare text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LlmReply {
    Text(String),
    Message(LlmResponse),
}

impl LlmReply {
    /// The response content, regardless of shape.
    pub fn content(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Message(response) => &response.content,
        }
    }

    /// Promote this reply to the structured shape, wrapping bare text as
    /// an assistant message with no tool calls.
    pub fn into_response(self) -> LlmResponse {
        match self {
            Self::Text(content) => LlmResponse::assistant(content),
            Self::Message(response) => response,
        }
    }
}
