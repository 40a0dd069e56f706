//! Convenience re-exports for common use.

pub use crate::config::LlmConfig;
pub use crate::error::{ErrorKind, LlmError, Result};
pub use crate::provider::claude_code::ClaudeCodeProvider;
pub use crate::provider::{Llm, ToolDefinition};
pub use crate::session::{AgentEvent, AgentSession, SessionRequest};
pub use crate::types::{LlmReply, LlmResponse, Message, MessageContent, ResponseFormat, Role, ToolCall};
