//! Claude Code backend: drives a single-turn agent session and assembles
//! its event stream into one provider response.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use futures::StreamExt;
use regex::Regex;
use tracing::debug;

use super::prompt;
use super::{Llm, ToolDefinition};
use crate::config::LlmConfig;
use crate::error::LlmError;
use crate::session::{
    AgentEvent, AgentSession, CliAgentSession, ContentBlock, SessionOptions, SessionRequest,
};
use crate::types::{LlmReply, LlmResponse, Message, ResponseFormat, Role, ToolCall};

const PROVIDER_NAME: &str = "claude-code";

/// Greedy first-`{`-to-last-`}` match. A documented heuristic: when a
/// response contains several brace-delimited regions the match spans them
/// all, and validation decides whether the span parses.
static JSON_OBJECT_RE: OnceLock<Regex> = OnceLock::new();

fn json_object_re() -> &'static Regex {
    JSON_OBJECT_RE.get_or_init(|| Regex::new(r"(?s)\{.*\}").unwrap())
}

/// Language-model backend that invokes a Claude Code agent session as if
/// it were a conventional request/response endpoint.
///
/// Each call compiles the conversation into one prompt, runs one
/// non-interactive session to completion, and reassembles the event
/// stream. No state survives a call; concurrent calls own independent
/// sessions and buffers.
pub struct ClaudeCodeProvider {
    config: LlmConfig,
    session: Arc<dyn AgentSession>,
}

impl ClaudeCodeProvider {
    /// Provider over the CLI transport configured in `config`.
    pub fn new(config: LlmConfig) -> Self {
        let session = Arc::new(CliAgentSession::new(config.binary.clone()));
        Self { config, session }
    }

    /// Provider over a caller-supplied session capability.
    pub fn with_session(config: LlmConfig, session: Arc<dyn AgentSession>) -> Self {
        Self { config, session }
    }

    /// Wrap a downstream failure in the uniform provider surface,
    /// preserving the originating message. Already-shaped provider and
    /// validation errors pass through untouched.
    fn wrap(err: LlmError) -> LlmError {
        match err {
            shaped @ (LlmError::Provider { .. } | LlmError::InvalidJson { .. }) => shaped,
            other => LlmError::provider(PROVIDER_NAME, other.to_string()),
        }
    }

    /// Drain the session's event stream, accumulating text and tool
    /// invocations from assistant messages in emission order.
    async fn run(&self, request: SessionRequest, wants_json: bool) -> Result<LlmReply, LlmError> {
        let mut events = self.session.submit(request).await.map_err(Self::wrap)?;

        let mut content = String::new();
        let mut tool_calls: Vec<ToolCall> = Vec::new();

        while let Some(event) = events.next().await {
            match event.map_err(Self::wrap)? {
                AgentEvent::Assistant { message } => {
                    for block in message.content {
                        match block {
                            ContentBlock::Text { text } => content.push_str(&text),
                            ContentBlock::ToolUse { name, input, .. } => {
                                let arguments = serde_json::to_string(&input)
                                    .map_err(|err| Self::wrap(err.into()))?;
                                tool_calls.push(ToolCall { name, arguments });
                            }
                            ContentBlock::Other => {}
                        }
                    }
                }
                AgentEvent::System | AgentEvent::Result | AgentEvent::Other => {}
            }
        }

        if wants_json {
            if let Some(found) = json_object_re().find(&content) {
                content = found.as_str().to_string();
            }
            if let Err(err) = serde_json::from_str::<serde_json::Value>(&content) {
                debug!(%err, "agent output failed JSON validation");
                return Err(LlmError::InvalidJson {
                    provider: PROVIDER_NAME.to_string(),
                    raw: content,
                });
            }
        }

        debug!(
            content_len = content.len(),
            tool_calls = tool_calls.len(),
            "assembled agent response"
        );

        if tool_calls.is_empty() {
            Ok(LlmReply::Text(content))
        } else {
            Ok(LlmReply::Message(LlmResponse {
                content,
                role: Role::Assistant,
                tool_calls: Some(tool_calls),
            }))
        }
    }
}

#[async_trait]
impl Llm for ClaudeCodeProvider {
    fn provider_name(&self) -> &str {
        PROVIDER_NAME
    }

    fn model_id(&self) -> &str {
        &self.config.model
    }

    async fn generate_response(
        &self,
        messages: &[Message],
        response_format: Option<&ResponseFormat>,
        _tools: Option<&[ToolDefinition]>,
    ) -> Result<LlmReply, LlmError> {
        let wants_json = response_format.is_some_and(ResponseFormat::wants_json);
        let compiled = prompt::compile(messages, wants_json);

        debug!(
            model = %self.config.model,
            wants_json,
            transcript_len = compiled.transcript.len(),
            "claude-code generate_response"
        );

        let system_prompt = if compiled.system_prompt.is_empty() {
            None
        } else {
            Some(compiled.system_prompt)
        };

        let request = SessionRequest {
            prompt: compiled.transcript,
            options: SessionOptions::single_turn(
                self.config.model.clone(),
                system_prompt,
                self.config.allowed_tools.clone(),
            ),
        };

        self.run(request, wants_json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_extraction_takes_first_brace_to_last_brace() {
        let found = json_object_re().find("noise {\"a\":1} trailing").unwrap();
        assert_eq!(found.as_str(), "{\"a\":1}");
    }

    #[test]
    fn json_extraction_spans_multiple_objects_greedily() {
        let found = json_object_re().find("{\"a\":1} and {\"b\":2}").unwrap();
        assert_eq!(found.as_str(), "{\"a\":1} and {\"b\":2}");
    }

    #[test]
    fn json_extraction_crosses_newlines() {
        let found = json_object_re().find("ok:\n{\n  \"a\": 1\n}\n").unwrap();
        assert_eq!(found.as_str(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn json_extraction_misses_plain_prose() {
        assert!(json_object_re().find("not json at all").is_none());
    }
}
