//! Shared test helpers: a scripted mock of the agent session capability.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::StreamExt;

use engram_llm::error::LlmError;
use engram_llm::session::{AgentEvent, AgentSession, EventStream, SessionRequest};

enum Script {
    Events(Vec<Result<AgentEvent, LlmError>>),
    SubmitError(LlmError),
}

/// A mock session that returns queued event scripts and captures every
/// submitted request.
pub struct MockAgentSession {
    scripts: Mutex<Vec<Script>>,
    requests: Mutex<Vec<SessionRequest>>,
}

#[allow(dead_code)]
impl MockAgentSession {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            scripts: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Queue a session that emits `events` and then completes.
    pub fn queue_events(&self, events: Vec<AgentEvent>) {
        self.scripts
            .lock()
            .unwrap()
            .push(Script::Events(events.into_iter().map(Ok).collect()));
    }

    /// Queue a session whose stream may fail partway through.
    pub fn queue_script(&self, script: Vec<Result<AgentEvent, LlmError>>) {
        self.scripts.lock().unwrap().push(Script::Events(script));
    }

    /// Queue a failure at session establishment.
    pub fn queue_submit_error(&self, err: LlmError) {
        self.scripts.lock().unwrap().push(Script::SubmitError(err));
    }

    pub fn last_request(&self) -> Option<SessionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl AgentSession for MockAgentSession {
    async fn submit(&self, request: SessionRequest) -> Result<EventStream, LlmError> {
        self.requests.lock().unwrap().push(request);
        let script = self.scripts.lock().unwrap().pop();
        match script {
            Some(Script::Events(events)) => Ok(futures::stream::iter(events).boxed()),
            Some(Script::SubmitError(err)) => Err(err),
            None => Ok(futures::stream::iter(Vec::<Result<AgentEvent, LlmError>>::new()).boxed()),
        }
    }
}
