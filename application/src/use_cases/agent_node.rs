//! Agent node: one brain bound to a persistent identity.
//!
//! A node processes one task at a time as a single think → execute sequence,
//! keeps a bounded history of finished tasks, and exposes a live status
//! snapshot. Concurrent `process_task` calls on one node queue behind each
//! other; the node stays active until the last of them returns. Nodes never share a brain, so tool registration and tool calls
//! on one node cannot race with another.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use squadron_domain::util::{preview, truncate_chars};
use squadron_domain::{
    ActivityState, AgentProfile, AgentStatus, Decision, DelegationContext, TaskHistory,
    TaskHistoryEntry, ToolResult,
};
use tracing::{error, info, warn};

use crate::ports::agent_events::{AgentEventSink, NoAgentEvents};
use crate::ports::memory::MemoryPort;
use crate::use_cases::brain::Brain;

/// Characters of the task echoed in the first thought.
const THOUGHT_TASK_PREVIEW: usize = 50;
/// Characters of the result sent with the completion event.
const COMPLETE_PREVIEW: usize = 200;
/// Memories folded into the prompt per task.
const RECALL_LIMIT: usize = 3;

#[derive(Debug, Default)]
struct NodeState {
    /// Calls to `process_task` that have started and not yet returned.
    in_flight: usize,
    current_task: Option<String>,
    current_thought: Option<String>,
    current_tool: Option<String>,
}

/// One `process_task` call. Counts as in flight from creation; owns the node's
/// turn once `wait_turn` returns. Dropping it clears the running task before
/// the turn passes on, including on cancellation or unwind.
struct InFlight<'a> {
    node: &'a AgentNode,
    turn: Option<tokio::sync::MutexGuard<'a, ()>>,
}

impl<'a> InFlight<'a> {
    fn enter(node: &'a AgentNode) -> Self {
        node.state().in_flight += 1;
        Self { node, turn: None }
    }

    async fn wait_turn(&mut self) {
        self.turn = Some(self.node.run_lock.lock().await);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = self.node.state();
        state.in_flight = state.in_flight.saturating_sub(1);
        if self.turn.is_some() {
            state.current_task = None;
            state.current_thought = None;
            state.current_tool = None;
        }
    }
}

pub struct AgentNode {
    profile: AgentProfile,
    brain: Brain,
    events: Arc<dyn AgentEventSink>,
    memory: Option<Arc<dyn MemoryPort>>,
    state: Mutex<NodeState>,
    history: Mutex<TaskHistory>,
    run_lock: tokio::sync::Mutex<()>,
}

impl AgentNode {
    pub fn new(profile: AgentProfile, brain: Brain) -> Self {
        let history = TaskHistory::with_capacity(brain.config().history_capacity);
        Self {
            profile,
            brain,
            events: Arc::new(NoAgentEvents),
            memory: None,
            state: Mutex::new(NodeState::default()),
            history: Mutex::new(history),
            run_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn AgentEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn with_memory(mut self, memory: Arc<dyn MemoryPort>) -> Self {
        self.memory = Some(memory);
        self
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    pub fn brain(&self) -> &Brain {
        &self.brain
    }

    fn state(&self) -> MutexGuard<'_, NodeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliver one event; a panicking sink is logged and skipped.
    fn emit(&self, event: impl FnOnce(&dyn AgentEventSink)) {
        if catch_unwind(AssertUnwindSafe(|| event(self.events.as_ref()))).is_err() {
            error!(agent = %self.profile.name, "Event sink panicked");
        }
    }

    fn set_thought(&self, thought: String, tool: Option<String>) {
        let mut state = self.state();
        state.current_thought = Some(thought);
        state.current_tool = tool;
    }

    /// Run one task through think and execute. Never fails.
    pub async fn process_task(&self, task: &str, context: Option<DelegationContext>) -> ToolResult {
        let name = self.profile.name.as_str();
        let mut in_flight = InFlight::enter(self);
        in_flight.wait_turn().await;
        self.state().current_task = Some(task.to_string());

        info!(agent = %name, "Processing task: {}", task);
        if let Some(ctx) = &context {
            info!(
                agent = %name,
                "Context from: {}",
                ctx.delegated_by.as_deref().unwrap_or("unknown")
            );
        }
        self.emit(|events| events.on_agent_start(name, task));

        let effective = self.effective_profile(task, context.as_ref()).await;

        let thought = format!("Analyzing task: {}...", truncate_chars(task, THOUGHT_TASK_PREVIEW));
        self.set_thought(thought.clone(), None);
        self.emit(|events| events.on_agent_thought(name, &thought));

        let decision = self.brain.think(task, &effective).await;

        let (thought, tool) = match &decision {
            Decision::ToolCall { tool_name, .. } => {
                (format!("Decided to use {}", tool_name), Some(tool_name.clone()))
            }
            Decision::Reply { .. } => ("Formulating response...".to_string(), None),
        };
        self.set_thought(thought.clone(), tool);
        self.emit(|events| events.on_agent_thought(name, &thought));

        if let Decision::ToolCall { tool_name, args } = &decision {
            self.emit(|events| events.on_tool_call(name, tool_name, args));
        }
        let result = self.brain.execute(&decision).await;
        if let Decision::ToolCall { tool_name, .. } = &decision {
            self.emit(|events| events.on_tool_result(name, tool_name, &result));
        }

        let entry = TaskHistoryEntry::new(task, context, &result.text);
        let summary = entry.result_summary.clone();
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);

        self.remember(task, &summary).await;

        self.emit(|events| {
            events.on_agent_complete(name, truncate_chars(&result.text, COMPLETE_PREVIEW))
        });

        info!(agent = %name, "Result: {}", preview(&result.text, THOUGHT_TASK_PREVIEW));
        result
    }

    /// Base prompt plus the delegation block and recalled memories.
    async fn effective_profile(
        &self,
        task: &str,
        context: Option<&DelegationContext>,
    ) -> AgentProfile {
        let mut prompt = self.profile.system_prompt.clone();
        if let Some(ctx) = context {
            prompt.push_str("\n\n");
            prompt.push_str(&ctx.render_block());
        }
        if let Some(block) = self.recall_block(task).await {
            prompt.push_str("\n\n");
            prompt.push_str(&block);
        }
        self.profile.with_system_prompt(prompt)
    }

    async fn recall_block(&self, task: &str) -> Option<String> {
        let memory = self.memory.as_ref()?;
        match memory
            .recall(task, &self.profile.name, true, RECALL_LIMIT)
            .await
        {
            Ok(records) if !records.is_empty() => {
                let mut lines = vec!["## Relevant Memories".to_string()];
                lines.extend(records.iter().map(|r| format!("- {}", r.content)));
                Some(lines.join("\n"))
            }
            Ok(_) => None,
            Err(e) => {
                warn!(agent = %self.profile.name, "Memory recall failed: {}", e);
                None
            }
        }
    }

    async fn remember(&self, task: &str, summary: &str) {
        let Some(memory) = &self.memory else {
            return;
        };
        let content = format!("Task: {}\nResult: {}", task, summary);
        if let Err(e) = memory.remember(&content, &self.profile.name).await {
            warn!(agent = %self.profile.name, "Failed to store memory: {}", e);
        }
    }

    pub fn get_status(&self) -> AgentStatus {
        let state = self.state();
        AgentStatus {
            name: self.profile.name.clone(),
            role: self.profile.role.clone(),
            status: if state.in_flight > 0 {
                ActivityState::Active
            } else {
                ActivityState::Idle
            },
            current_task: state.current_task.clone(),
            current_thought: state.current_thought.clone(),
            current_tool: state.current_tool.clone(),
        }
    }

    /// The most recent `limit` entries, newest last.
    pub fn get_history(&self, limit: usize) -> Vec<TaskHistoryEntry> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .recent(limit)
    }

    pub fn is_busy(&self) -> bool {
        self.state().in_flight > 0
    }
}
