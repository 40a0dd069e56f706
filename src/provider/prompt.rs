//! Prompt compilation: flatten a conversation into one transcript string
//! plus one system instruction.

use crate::types::{Message, MessageContent, Role};

/// Directive appended to the system instruction in JSON mode.
const JSON_DIRECTIVE: &str = "IMPORTANT: You MUST respond with valid JSON only. \
Do not include any markdown formatting, code blocks, or explanatory text. \
Your entire response should be parseable JSON.";

/// Result of compiling a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPrompt {
    /// Flattened rendering of the non-system turns, trimmed.
    pub transcript: String,
    /// Instruction text from the first system message (empty when there is
    /// none), with the JSON directive appended in JSON mode.
    pub system_prompt: String,
}

/// Compile `messages` into a transcript and system instruction.
///
/// Pure and deterministic: no I/O, no side effects. Only the first
/// system-role message contributes to the instruction; every other message
/// is rendered into the transcript in original order. Image content
/// contributes its URL.
pub fn compile(messages: &[Message], wants_json: bool) -> CompiledPrompt {
    let mut transcript = String::new();
    for message in messages {
        let label = match message.role {
            Role::User => "User",
            Role::Assistant => "Assistant",
            Role::System => continue,
        };
        transcript.push_str(label);
        transcript.push_str(": ");
        transcript.push_str(message.content.as_text());
        transcript.push_str("\n\n");
    }

    let mut system_prompt = messages
        .iter()
        .find(|message| message.role == Role::System)
        .and_then(|message| match &message.content {
            MessageContent::Text(text) => Some(text.clone()),
            MessageContent::ImageUrl { .. } => None,
        })
        .unwrap_or_default();

    if wants_json {
        system_prompt.push_str("\n\n");
        system_prompt.push_str(JSON_DIRECTIVE);
    }

    CompiledPrompt {
        transcript: transcript.trim().to_string(),
        system_prompt,
    }
}
