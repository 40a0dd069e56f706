//! Demonstration: the Claude Code backend as a plain chat endpoint and as
//! a JSON-mode memory extractor.
//!
//! Run: `cargo run --example claude_code`. Needs an authenticated `claude`
//! binary on PATH (or `ENGRAM_CLAUDE_BINARY`); no API key passes through
//! this crate.

use engram_llm::prelude::*;

#[tokio::main]
async fn main() -> engram_llm::error::Result<()> {
    let provider = ClaudeCodeProvider::new(LlmConfig::from_env());

    let chat = provider
        .generate_chat(&[
            Message::system("You are a helpful assistant."),
            Message::user("What is the capital of France? Answer in one sentence."),
        ])
        .await?;
    println!("chat response:\n{}\n", chat.content);

    let memory_prompt = "Extract the key facts from this conversation and return them as JSON:\n\n\
        User: \"Hi, my name is Em and I'm a software engineer at Automattic. I love working \
        with TypeScript and building AI tools.\"\n\n\
        Return a JSON object of the form {\"facts\": [{\"category\": \"...\", \"fact\": \"...\"}]}.";

    let extraction = provider
        .generate_response(
            &[
                Message::system(
                    "You are a memory extraction assistant. Extract key facts and return only valid JSON.",
                ),
                Message::user(memory_prompt),
            ],
            Some(&ResponseFormat::JsonObject),
            None,
        )
        .await?;
    println!("extracted memories:\n{}", extraction.content());

    Ok(())
}
