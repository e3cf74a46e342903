//! Console printer for agent lifecycle events.

use colored::Colorize;
use squadron_application::AgentEventSink;
use squadron_domain::util::preview;
use squadron_domain::{ToolArgs, ToolResult};

const TOOL_RESULT_PREVIEW: usize = 120;

/// Prints agent activity to stderr so stdout carries only results.
pub struct ConsoleAgentEvents {
    show_thoughts: bool,
}

impl ConsoleAgentEvents {
    pub fn new() -> Self {
        Self {
            show_thoughts: true,
        }
    }

    /// Print only start/complete and tool lines
    pub fn quiet() -> Self {
        Self {
            show_thoughts: false,
        }
    }

    pub fn format_start(agent: &str, task: &str) -> String {
        format!("{} {} {}", "▶".green().bold(), agent.bold(), task)
    }

    pub fn format_thought(agent: &str, thought: &str) -> String {
        format!("  {} {}: {}", "…".dimmed(), agent, thought.dimmed())
    }

    pub fn format_tool_call(agent: &str, tool_name: &str) -> String {
        format!("  {} {} → {}", "⚙".yellow(), agent, tool_name.yellow())
    }

    pub fn format_tool_result(tool_name: &str, result: &ToolResult) -> String {
        let first_line = result.text.lines().next().unwrap_or_default();
        format!(
            "  {} {}: {}",
            "↳".cyan(),
            tool_name,
            preview(first_line, TOOL_RESULT_PREVIEW).dimmed()
        )
    }

    pub fn format_complete(agent: &str) -> String {
        format!("{} {} done", "✓".green().bold(), agent.bold())
    }
}

impl Default for ConsoleAgentEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentEventSink for ConsoleAgentEvents {
    fn on_agent_start(&self, agent: &str, task: &str) {
        eprintln!("{}", Self::format_start(agent, task));
    }

    fn on_agent_thought(&self, agent: &str, thought: &str) {
        if self.show_thoughts {
            eprintln!("{}", Self::format_thought(agent, thought));
        }
    }

    fn on_agent_complete(&self, agent: &str, _result_preview: &str) {
        eprintln!("{}", Self::format_complete(agent));
    }

    fn on_tool_call(&self, agent: &str, tool_name: &str, _args: &ToolArgs) {
        eprintln!("{}", Self::format_tool_call(agent, tool_name));
    }

    fn on_tool_result(&self, _agent: &str, tool_name: &str, result: &ToolResult) {
        eprintln!("{}", Self::format_tool_result(tool_name, result));
    }
}
