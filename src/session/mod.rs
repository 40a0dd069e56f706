//! Agent session capability: submit a prompt/options bundle, receive a
//! finite asynchronous sequence of typed events.
//!
//! The session driver depends only on the [`AgentSession`] trait; the
//! production transport lives in [`cli`].

pub mod cli;

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::LlmError;

pub use cli::CliAgentSession;

/// The event sequence a session produces. Finite: it terminates when the
/// agent session ends.
pub type EventStream = BoxStream<'static, Result<AgentEvent, LlmError>>;

/// A single-shot request to the agent capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequest {
    pub prompt: String,
    pub options: SessionOptions,
}

/// Options carried by a session request.
///
/// Use [`SessionOptions::single_turn`]; it pins the invariants that keep
/// the agent from recursing back into this adapter (one turn, no partial
/// messages, no interactive prompts, no external setting sources).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub model: String,
    pub system_prompt: Option<String>,
    pub allowed_tools: Vec<String>,
    pub max_turns: u32,
    pub include_partial_messages: bool,
    pub permission_mode: PermissionMode,
    pub setting_sources: Vec<SettingSource>,
}

impl SessionOptions {
    /// Options for one non-interactive generation turn.
    ///
    /// `setting_sources` stays empty so the agent loads no project
    /// settings or hooks: a hook could otherwise re-invoke the very
    /// adapter that spawned the session.
    pub fn single_turn(
        model: impl Into<String>,
        system_prompt: Option<String>,
        allowed_tools: Vec<String>,
    ) -> Self {
        Self {
            model: model.into(),
            system_prompt,
            allowed_tools,
            max_turns: 1,
            include_partial_messages: false,
            permission_mode: PermissionMode::BypassPermissions,
            setting_sources: Vec::new(),
        }
    }
}

/// Permission handling for tool use inside the session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum PermissionMode {
    Default,
    AcceptEdits,
    BypassPermissions,
    Plan,
}

/// An external settings layer the agent may load.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SettingSource {
    User,
    Project,
    Local,
}

/// An event emitted by an agent session.
///
/// Only assistant messages matter to response assembly; the remaining
/// kinds are agent-runtime-internal signals, named here so transports can
/// decode them but otherwise ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    Assistant { message: AssistantMessage },
    System,
    Result,
    #[serde(other)]
    Other,
}

impl AgentEvent {
    /// Convenience constructor for an assistant event with one text block.
    pub fn assistant_text(text: impl Into<String>) -> Self {
        Self::Assistant {
            message: AssistantMessage {
                content: vec![ContentBlock::Text { text: text.into() }],
            },
        }
    }

    /// Convenience constructor for an assistant event with the given blocks.
    pub fn assistant_blocks(content: Vec<ContentBlock>) -> Self {
        Self::Assistant {
            message: AssistantMessage { content },
        }
    }
}

/// The ordered content of one assistant message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssistantMessage {
    pub content: Vec<ContentBlock>,
}

/// One block of assistant message content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    #[serde(other)]
    Other,
}

/// The external reasoning-process abstraction: accepts a prompt/options
/// bundle and emits a sequence of events until completion.
#[async_trait]
pub trait AgentSession: Send + Sync {
    /// Start a session and return its event stream.
    ///
    /// Establishment failures are reported here; failures mid-session
    /// surface as `Err` items on the stream.
    async fn submit(&self, request: SessionRequest) -> Result<EventStream, LlmError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_turn_pins_anti_recursion_invariants() {
        let options = SessionOptions::single_turn("claude-sonnet-4-5-20250929", None, vec![]);
        assert_eq!(options.max_turns, 1);
        assert!(!options.include_partial_messages);
        assert_eq!(options.permission_mode, PermissionMode::BypassPermissions);
        assert!(options.setting_sources.is_empty());
    }

    #[test]
    fn permission_mode_uses_cli_wire_names() {
        assert_eq!(PermissionMode::BypassPermissions.to_string(), "bypassPermissions");
        assert_eq!(PermissionMode::AcceptEdits.to_string(), "acceptEdits");
    }

    #[test]
    fn assistant_event_decodes_text_and_tool_use_blocks() {
        let line = r#"{"type":"assistant","message":{"content":[
            {"type":"text","text":"Sure: "},
            {"type":"tool_use","id":"toolu_01","name":"Read","input":{"file_path":"a.md"}}
        ]}}"#;
        let event: AgentEvent = serde_json::from_str(line).unwrap();
        let AgentEvent::Assistant { message } = event else {
            panic!("expected assistant event");
        };
        assert_eq!(message.content.len(), 2);
        assert_eq!(
            message.content[0],
            ContentBlock::Text { text: "Sure: ".to_string() }
        );
    }

    #[test]
    fn unknown_event_kinds_decode_as_other() {
        let event: AgentEvent =
            serde_json::from_str(r#"{"type":"stream_event","uuid":"x"}"#).unwrap();
        assert_eq!(event, AgentEvent::Other);
    }

    #[test]
    fn unknown_content_blocks_decode_as_other() {
        let line = r#"{"type":"assistant","message":{"content":[{"type":"thinking","thinking":"hm"}]}}"#;
        let event: AgentEvent = serde_json::from_str(line).unwrap();
        let AgentEvent::Assistant { message } = event else {
            panic!("expected assistant event");
        };
        assert_eq!(message.content, vec![ContentBlock::Other]);
    }

    #[test]
    fn result_events_decode_ignoring_payload() {
        let event: AgentEvent =
            serde_json::from_str(r#"{"type":"result","is_error":false,"result":"4"}"#).unwrap();
        assert_eq!(event, AgentEvent::Result);
    }
}
