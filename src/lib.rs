//! Engram LLM — language-model provider layer for the Engram memory engine.
//!
//! Provides the generic [`provider::Llm`] contract the engine's backends
//! implement, plus the Claude Code backend: a provider that drives a
//! non-interactive agent session (the authenticated `claude` binary) and
//! reassembles its event stream into a conventional request/response result.
//!
//! # Quick Start
//!
//! ```no_run
//! use engram_llm::prelude::*;
//!
//! # async fn example() -> engram_llm::error::Result<()> {
//! let provider = ClaudeCodeProvider::new(LlmConfig::default());
//! let response = provider
//!     .generate_chat(&[
//!         Message::system("Be terse."),
//!         Message::user("What is the capital of France?"),
//!     ])
//!     .await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod prelude;
pub mod provider;
pub mod session;
pub mod types;
