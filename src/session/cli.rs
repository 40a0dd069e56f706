//! CLI transport for the agent session capability.
//!
//! Spawns the authenticated `claude` executable in non-interactive
//! streaming-JSON mode and decodes one event per stdout line. One process
//! per submitted request; dropping the event stream kills the child, so
//! caller cancellation propagates straight to the agent.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::process::Command;
use tracing::debug;

use super::{AgentEvent, AgentSession, EventStream, SessionRequest};
use crate::error::LlmError;

const PROVIDER: &str = "claude-code";

/// Agent session transport backed by the `claude` binary.
///
/// Authentication is the CLI's own concern; no API key passes through
/// this crate.
pub struct CliAgentSession {
    binary: PathBuf,
}

impl CliAgentSession {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn build_command(&self, request: &SessionRequest) -> Command {
        let options = &request.options;
        let max_turns = options.max_turns.to_string();
        let permission_mode = options.permission_mode.to_string();
        let setting_sources = options
            .setting_sources
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");

        let mut cmd = Command::new(&self.binary);
        cmd.arg("--print").arg("--verbose");
        cmd.args(["--output-format", "stream-json"]);
        cmd.args(["--model", options.model.as_str()]);
        cmd.args(["--max-turns", max_turns.as_str()]);
        cmd.args(["--permission-mode", permission_mode.as_str()]);
        // Always passed, even when empty: an empty list tells the agent to
        // load no settings layers at all.
        cmd.args(["--setting-sources", setting_sources.as_str()]);
        if !options.allowed_tools.is_empty() {
            cmd.args(["--allowed-tools", options.allowed_tools.join(",").as_str()]);
        }
        if let Some(ref system_prompt) = options.system_prompt {
            cmd.args(["--system-prompt", system_prompt.as_str()]);
        }
        if options.include_partial_messages {
            cmd.arg("--include-partial-messages");
        }
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl AgentSession for CliAgentSession {
    async fn submit(&self, request: SessionRequest) -> Result<EventStream, LlmError> {
        let mut cmd = self.build_command(&request);
        debug!(
            binary = %self.binary.display(),
            model = %request.options.model,
            "spawning agent session"
        );

        let mut child = cmd.spawn().map_err(|err| {
            LlmError::provider(
                PROVIDER,
                format!(
                    "failed to spawn agent binary '{}': {err}",
                    self.binary.display()
                ),
            )
        })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| LlmError::Stream("agent child has no stdin".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| LlmError::Stream("agent child has no stdout".to_string()))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| LlmError::Stream("agent child has no stderr".to_string()))?;

        // Writer runs off to the side so a prompt larger than the pipe
        // buffer cannot deadlock against an unread stdout. Closing stdin
        // marks the end of the prompt.
        let prompt = request.prompt;
        tokio::spawn(async move {
            if let Err(err) = stdin.write_all(prompt.as_bytes()).await {
                debug!(%err, "failed writing prompt to agent stdin");
            }
        });

        // Drain stderr concurrently for the same reason; its contents only
        // matter if the child fails.
        let stderr_task = tokio::spawn(async move {
            let mut buf = String::new();
            let _ = stderr.read_to_string(&mut buf).await;
            buf
        });

        let stream = async_stream::stream! {
            let mut lines = BufReader::new(stdout).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<AgentEvent>(line) {
                            Ok(event) => {
                                yield Ok(event);
                            }
                            Err(err) => {
                                // Unknown event shapes are not fatal; the
                                // driver ignores non-assistant events anyway.
                                debug!(%err, "skipping undecodable agent event line");
                            }
                        }
                    }
                    Ok(None) => break,
                    Err(err) => {
                        yield Err(LlmError::Io(err));
                        break;
                    }
                }
            }

            match child.wait().await {
                Ok(status) if !status.success() => {
                    let diagnostics = stderr_task.await.unwrap_or_default();
                    let diagnostics = diagnostics.trim();
                    let detail = if diagnostics.is_empty() {
                        "no diagnostic output"
                    } else {
                        diagnostics
                    };
                    yield Err(LlmError::provider(
                        PROVIDER,
                        format!("agent exited with {status}: {detail}"),
                    ));
                }
                Ok(status) => {
                    debug!(%status, "agent session complete");
                    stderr_task.abort();
                }
                Err(err) => {
                    yield Err(LlmError::Io(err));
                }
            }
        };

        Ok(stream.boxed())
    }
}
