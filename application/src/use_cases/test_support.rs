//! Hand-written test doubles shared by the use case tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use squadron_domain::{
    ArgsExt, RegisteredTool, ToolArgs, ToolDefinition, ToolOutput, ToolResult, tool_fn,
};

use crate::ports::agent_events::AgentEventSink;
use crate::ports::language_model::{LanguageModel, ModelError};
use crate::ports::memory::{MemoryError, MemoryPort, MemoryRecord};
use crate::ports::safety_confirmation::{
    ConfirmationDecision, ConfirmationError, SafetyConfirmationPort,
};
use crate::ports::tool_source::{ExternalToolSource, ToolSourceError};

/// Language model returning scripted responses in order and recording prompts.
pub struct ScriptedModel {
    responses: Mutex<VecDeque<Result<String, ModelError>>>,
    prompts: Mutex<Vec<String>>,
    calls: Mutex<Vec<(u32, f32)>>,
}

impl ScriptedModel {
    pub fn new(responses: Vec<Result<String, ModelError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn replies(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<(u32, f32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ModelError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.calls.lock().unwrap().push((max_tokens, temperature));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(r#"{"action": "reply", "content": "(no more responses)"}"#.into()))
    }
}

/// Event sink recording events as `kind:agent:detail` strings.
#[derive(Default)]
pub struct RecordingEvents {
    events: Mutex<Vec<String>>,
}

impl RecordingEvents {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn record(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl AgentEventSink for RecordingEvents {
    fn on_agent_start(&self, agent: &str, task: &str) {
        self.record(format!("start:{}:{}", agent, task));
    }

    fn on_agent_thought(&self, agent: &str, thought: &str) {
        self.record(format!("thought:{}:{}", agent, thought));
    }

    fn on_agent_complete(&self, agent: &str, result_preview: &str) {
        self.record(format!("complete:{}:{}", agent, result_preview));
    }

    fn on_tool_call(&self, agent: &str, tool_name: &str, _args: &ToolArgs) {
        self.record(format!("tool_call:{}:{}", agent, tool_name));
    }

    fn on_tool_result(&self, agent: &str, tool_name: &str, _result: &ToolResult) {
        self.record(format!("tool_result:{}:{}", agent, tool_name));
    }
}

/// Confirmation port with a fixed answer, an optional delay, and a call counter.
pub struct ScriptedConfirmation {
    answer: Result<ConfirmationDecision, ConfirmationError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedConfirmation {
    pub fn answering(answer: Result<ConfirmationDecision, ConfirmationError>) -> Self {
        Self {
            answer,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SafetyConfirmationPort for ScriptedConfirmation {
    async fn confirm(
        &self,
        _tool_name: &str,
        _args: &ToolArgs,
    ) -> Result<ConfirmationDecision, ConfirmationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.answer.clone()
    }
}

/// Tool source returning a fixed catalog (or error) and counting loads.
pub struct CountingToolSource {
    result: Result<Vec<RegisteredTool>, ToolSourceError>,
    loads: AtomicUsize,
}

impl CountingToolSource {
    pub fn new(result: Result<Vec<RegisteredTool>, ToolSourceError>) -> Self {
        Self {
            result,
            loads: AtomicUsize::new(0),
        }
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExternalToolSource for CountingToolSource {
    async fn load_tools(&self) -> Result<Vec<RegisteredTool>, ToolSourceError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// In-memory store recording what was remembered.
#[derive(Default)]
pub struct RecordingMemory {
    pub stored: Mutex<Vec<(String, String)>>,
    pub recalled: Vec<MemoryRecord>,
    pub fail: bool,
}

#[async_trait]
impl MemoryPort for RecordingMemory {
    async fn remember(&self, content: &str, agent: &str) -> Result<String, MemoryError> {
        if self.fail {
            return Err(MemoryError::Unavailable("offline".into()));
        }
        let mut stored = self.stored.lock().unwrap();
        stored.push((agent.to_string(), content.to_string()));
        Ok(format!("mem-{}", stored.len()))
    }

    async fn recall(
        &self,
        _query: &str,
        _agent: &str,
        _include_shared: bool,
        limit: usize,
    ) -> Result<Vec<MemoryRecord>, MemoryError> {
        if self.fail {
            return Err(MemoryError::Unavailable("offline".into()));
        }
        Ok(self.recalled.iter().take(limit).cloned().collect())
    }
}

/// `echo` tool: returns `"Echo: " + msg`.
pub fn echo_tool() -> RegisteredTool {
    RegisteredTool::new(
        ToolDefinition::new("echo", "Echo a message back"),
        tool_fn(|args| Ok(format!("Echo: {}", args.require_str("msg")?).into())),
    )
}

/// Hazardous tool that records nothing and returns a fixed string.
pub fn hazardous_tool(name: &str) -> RegisteredTool {
    RegisteredTool::new(
        ToolDefinition::new(name, "Does something dangerous").hazardous(),
        tool_fn(|_| Ok(ToolOutput::from("done"))),
    )
}
