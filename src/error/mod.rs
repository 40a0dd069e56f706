//! Error types for the Engram LLM layer.

use thiserror::Error;

/// Primary error type for all provider operations.
///
/// Every failure a backend raises crosses the caller boundary as one of
/// these variants. Session failures (spawning, submitting, or draining an
/// agent session) and output-validation failures are distinct variants so
/// callers can tell a transport problem from a malformed response without
/// a second error surface.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stream error: {0}")]
    Stream(String),

    /// A failure submitting to or draining an agent session, with the
    /// originating failure's message preserved.
    #[error("{provider} provider error: {message}")]
    Provider { provider: String, message: String },

    /// JSON mode was requested and the assembled output did not parse.
    /// `raw` carries the offending buffer so callers can diagnose it.
    #[error("{provider} did not return valid JSON: {raw}")]
    InvalidJson { provider: String, raw: String },
}

/// Coarse classification of an [`LlmError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The session could not be established or drained.
    Session,
    /// The session completed but its output failed validation.
    Validation,
    /// The provider was misconfigured before any session started.
    Configuration,
}

impl LlmError {
    /// Create a provider (session-failure) error.
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::InvalidJson { .. } => ErrorKind::Validation,
            Self::Io(_) | Self::Serialization(_) | Self::Stream(_) | Self::Provider { .. } => {
                ErrorKind::Session
            }
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, LlmError>;
