//! Agent lifecycle event port.
//!
//! [`AgentEventSink`] is an **output port** for observing agents: the console
//! printer and the JSONL event log both implement it.
//!
//! Every callback is fire-and-forget. The signatures are infallible, so a
//! misbehaving sink cannot fail the task it observes; adapters swallow their
//! own I/O errors. Sinks should not panic. If one does, `AgentNode` catches
//! the panic, logs it and carries on with the task.
//!
//! For one `process_task` call the order is always:
//!
//! ```text
//! on_agent_start → on_agent_thought (analyzing) → on_agent_thought (decision)
//!     [→ on_tool_call → on_tool_result] → on_agent_complete
//! ```

use std::sync::Arc;

use squadron_domain::{ToolArgs, ToolResult};

/// Observer for agent activity.
///
/// Tool callbacks have default no-op implementations.
pub trait AgentEventSink: Send + Sync {
    /// An agent accepted a task
    fn on_agent_start(&self, agent: &str, task: &str);

    /// An agent recorded an intermediate thought
    fn on_agent_thought(&self, agent: &str, thought: &str);

    /// An agent finished; `result_preview` is a truncated result text
    fn on_agent_complete(&self, agent: &str, result_preview: &str);

    /// An agent is about to invoke a tool
    fn on_tool_call(&self, _agent: &str, _tool_name: &str, _args: &ToolArgs) {}

    /// A tool invocation returned (successfully or with error text)
    fn on_tool_result(&self, _agent: &str, _tool_name: &str, _result: &ToolResult) {}
}

/// No-op sink for when no observer is wired.
pub struct NoAgentEvents;

impl AgentEventSink for NoAgentEvents {
    fn on_agent_start(&self, _agent: &str, _task: &str) {}
    fn on_agent_thought(&self, _agent: &str, _thought: &str) {}
    fn on_agent_complete(&self, _agent: &str, _result_preview: &str) {}
}

/// A sink that forwards every event to several inner sinks, in order.
///
/// ```text
/// AgentNode ──▶ FanoutEvents ─┬─▶ ConsoleAgentEvents (terminal)
///                             └─▶ JsonlAgentEventLog (file)
/// ```
#[derive(Default)]
pub struct FanoutEvents {
    delegates: Vec<Arc<dyn AgentEventSink>>,
}

impl FanoutEvents {
    pub fn new(delegates: Vec<Arc<dyn AgentEventSink>>) -> Self {
        Self { delegates }
    }

    pub fn push(&mut self, sink: Arc<dyn AgentEventSink>) {
        self.delegates.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }
}

/// Macro to delegate a method call to all inner sinks.
macro_rules! delegate {
    ($self:ident, $method:ident $(, $arg:expr)*) => {
        for d in &$self.delegates {
            d.$method($($arg),*);
        }
    };
}

impl AgentEventSink for FanoutEvents {
    fn on_agent_start(&self, agent: &str, task: &str) {
        delegate!(self, on_agent_start, agent, task);
    }

    fn on_agent_thought(&self, agent: &str, thought: &str) {
        delegate!(self, on_agent_thought, agent, thought);
    }

    fn on_agent_complete(&self, agent: &str, result_preview: &str) {
        delegate!(self, on_agent_complete, agent, result_preview);
    }

    fn on_tool_call(&self, agent: &str, tool_name: &str, args: &ToolArgs) {
        delegate!(self, on_tool_call, agent, tool_name, args);
    }

    fn on_tool_result(&self, agent: &str, tool_name: &str, result: &ToolResult) {
        delegate!(self, on_tool_result, agent, tool_name, result);
    }
}
