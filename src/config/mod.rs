//! Provider configuration.

use std::path::PathBuf;

use bon::Builder;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";

/// Default advisory cap on output tokens.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Tools the agent session may use while generating memories: read-only
/// file access plus a small allow-list of shell subcommands for listing,
/// reading, and git history.
pub fn default_allowed_tools() -> Vec<String> {
    [
        "Read",
        "Grep",
        "Glob",
        "Bash(ls:*)",
        "Bash(cat:*)",
        "Bash(git log:*)",
        "Bash(git diff:*)",
    ]
    .map(String::from)
    .to_vec()
}

/// Configuration for an LLM provider instance.
///
/// Constructed once per provider and reused for every call.
///
/// ```
/// use engram_llm::config::LlmConfig;
///
/// let config = LlmConfig::builder()
///     .model("claude-sonnet-4-5-20250929")
///     .max_tokens(2048)
///     .build();
/// ```
#[derive(Debug, Clone, Builder)]
pub struct LlmConfig {
    /// Model identifier passed to the agent session.
    #[builder(default = DEFAULT_MODEL.to_string(), into)]
    pub model: String,

    /// Advisory output-token hint. The agent CLI exposes no per-request
    /// output cap in print mode, so this is carried but not enforced.
    #[builder(default = DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    /// Tool identifiers the agent session is permitted to use.
    #[builder(default = default_allowed_tools())]
    pub allowed_tools: Vec<String>,

    /// Agent executable driven by the CLI transport.
    #[builder(default = PathBuf::from("claude"), into)]
    pub binary: PathBuf,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl LlmConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// Reads `ENGRAM_LLM_MODEL`, `ENGRAM_LLM_MAX_TOKENS`, and
    /// `ENGRAM_CLAUDE_BINARY`, after a best-effort `.env` load.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let mut config = Self::default();
        if let Ok(model) = std::env::var("ENGRAM_LLM_MODEL") {
            config.model = model;
        }
        if let Some(max_tokens) = std::env::var("ENGRAM_LLM_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.max_tokens = max_tokens;
        }
        if let Ok(binary) = std::env::var("ENGRAM_CLAUDE_BINARY") {
            config.binary = PathBuf::from(binary);
        }
        config
    }
}
