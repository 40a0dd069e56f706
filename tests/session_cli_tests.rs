//! Tests for the CLI transport against a fake agent executable.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use futures::StreamExt;

use engram_llm::error::{ErrorKind, LlmError};
use engram_llm::session::{
    AgentEvent, AgentSession, CliAgentSession, SessionOptions, SessionRequest,
};

fn write_fake_agent(dir: &tempfile::TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("fake-claude");
    std::fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

fn single_turn_request() -> SessionRequest {
    SessionRequest {
        prompt: "User: 2+2?".to_string(),
        options: SessionOptions::single_turn(
            "claude-sonnet-4-5-20250929",
            Some("Be terse.".to_string()),
            vec!["Read".to_string()],
        ),
    }
}

#[tokio::test]
async fn decodes_ndjson_events_in_order_and_skips_noise() {
    let dir = tempfile::tempdir().unwrap();
    let binary = write_fake_agent(
        &dir,
        concat!(
            "cat >/dev/null\n",
            "echo '{\"type\":\"system\",\"subtype\":\"init\"}'\n",
            "echo 'not an event line'\n",
            "echo '{\"type\":\"assistant\",\"message\":{\"content\":[{\"type\":\"text\",\"text\":\"4\"}]}}'\n",
            "echo '{\"type\":\"result\",\"is_error\":false,\"result\":\"4\"}'\n",
        ),
    );

    let session = CliAgentSession::new(binary);
    let stream = session.submit(single_turn_request()).await.unwrap();
    let events: Vec<AgentEvent> = stream.map(|event| event.unwrap()).collect().await;

    assert_eq!(
        events,
        vec![
            AgentEvent::System,
            AgentEvent::assistant_text("4"),
            AgentEvent::Result,
        ]
    );
}

#[tokio::test]
async fn nonzero_exit_surfaces_stderr_as_session_error() {
    let dir = tempfile::tempdir().unwrap();
    let binary = write_fake_agent(
        &dir,
        concat!(
            "cat >/dev/null\n",
            "echo 'credentials expired' >&2\n",
            "exit 3\n",
        ),
    );

    let session = CliAgentSession::new(binary);
    let stream = session.submit(single_turn_request()).await.unwrap();
    let results: Vec<Result<AgentEvent, LlmError>> = stream.collect().await;

    let err = results
        .into_iter()
        .find_map(Result::err)
        .expect("expected a session error from the failing agent");
    assert_eq!(err.kind(), ErrorKind::Session);
    assert!(
        err.to_string().contains("credentials expired"),
        "expected stderr in: {err}"
    );
}

#[tokio::test]
async fn missing_binary_fails_at_submit() {
    let session = CliAgentSession::new("/nonexistent/engram-no-such-agent");
    // `EventStream` is a `BoxStream` and so is not `Debug`; extract the error
    // without `unwrap_err` (which would require the `Ok` type to be `Debug`).
    let err = match session.submit(single_turn_request()).await {
        Ok(_) => panic!("expected submit to fail for a missing binary"),
        Err(err) => err,
    };
    assert_eq!(err.kind(), ErrorKind::Session);
    assert!(
        err.to_string().contains("failed to spawn"),
        "expected spawn diagnostic in: {err}"
    );
}
