//! Provider trait and implementations.

pub mod claude_code;
pub mod prompt;

use async_trait::async_trait;

use crate::error::LlmError;
use crate::types::{LlmReply, LlmResponse, Message, ResponseFormat};

/// Tool definition offered by a caller.
///
/// Part of the shared contract; backends that cannot accept foreign tool
/// definitions (the agent session runs its own sandboxed tool set) accept
/// and ignore them.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Core trait implemented by all language-model backends.
#[async_trait]
pub trait Llm: Send + Sync {
    /// Backend name (e.g., "claude-code").
    fn provider_name(&self) -> &str;

    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Generate a response for the given conversation.
    ///
    /// Returns bare text unless the backend observed tool invocations, in
    /// which case the structured shape carries them in emission order.
    async fn generate_response(
        &self,
        messages: &[Message],
        response_format: Option<&ResponseFormat>,
        tools: Option<&[ToolDefinition]>,
    ) -> Result<LlmReply, LlmError>;

    /// Generate a response, always in the structured shape.
    ///
    /// Wraps bare text as an assistant message; introduces no failure
    /// modes beyond those of [`Llm::generate_response`].
    async fn generate_chat(&self, messages: &[Message]) -> Result<LlmResponse, LlmError> {
        Ok(self
            .generate_response(messages, None, None)
            .await?
            .into_response())
    }
}
