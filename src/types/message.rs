//! Message types for provider communication.

use serde::{Deserialize, Serialize};

/// A message in a conversation.
///
/// Ordering across a slice of messages is significant and preserved by
/// every consumer in this crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
}

impl Message {
    /// Create a system message.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: MessageContent::Text(text.into()),
        }
    }

    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    /// Create an assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: MessageContent::Text(text.into()),
        }
    }

    /// Create a user message referencing an image by URL.
    pub fn user_image(url: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::ImageUrl { url: url.into() },
        }
    }
}

/// Conversation role.
///
/// The set of roles is a hard contract: a message can only carry one of
/// these three, so nothing a caller constructs can be silently dropped by
/// the prompt compiler.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Message content: plain text, or an image reference.
///
/// Image references contribute their URL wherever textual content is
/// required (the transcript renders the locator, not the pixels).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    ImageUrl { url: String },
}

impl MessageContent {
    /// The textual rendering of this content: the text itself, or the
    /// image's URL.
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::ImageUrl { url } => url,
        }
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}
