//! JSONL file writer for agent events.
//!
//! Each event is serialized as a single JSON line with a `type` field and
//! `timestamp`, appended to the file via a buffered writer.

use serde_json::{Value, json};
use squadron_application::AgentEventSink;
use squadron_domain::{ToolArgs, ToolResult};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL agent event log that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlAgentEventLog {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlAgentEventLog {
    /// Open (append) the log at the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create event log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open event log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, event_type: &str, agent: &str, mut payload: serde_json::Map<String, Value>) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        payload.insert("type".to_string(), Value::String(event_type.to_string()));
        payload.insert("timestamp".to_string(), Value::String(timestamp));
        payload.insert("agent".to_string(), Value::String(agent.to_string()));

        let line = match serde_json::to_string(&payload) {
            Ok(line) => line,
            Err(e) => {
                warn!("Could not serialize {} event: {}", event_type, e);
                return;
            }
        };

        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        // Flushed per line: the log is append-only and must survive a crash
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            warn!("Could not write to event log {}: {}", self.path.display(), e);
        }
    }
}

fn fields(value: Value) -> serde_json::Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}

impl AgentEventSink for JsonlAgentEventLog {
    fn on_agent_start(&self, agent: &str, task: &str) {
        self.write("agent_start", agent, fields(json!({ "task": task })));
    }

    fn on_agent_thought(&self, agent: &str, thought: &str) {
        self.write("agent_thought", agent, fields(json!({ "thought": thought })));
    }

    fn on_agent_complete(&self, agent: &str, result_preview: &str) {
        self.write(
            "agent_complete",
            agent,
            fields(json!({ "result_preview": result_preview })),
        );
    }

    fn on_tool_call(&self, agent: &str, tool_name: &str, args: &ToolArgs) {
        self.write(
            "tool_call",
            agent,
            fields(json!({ "tool": tool_name, "args": args })),
        );
    }

    fn on_tool_result(&self, agent: &str, tool_name: &str, result: &ToolResult) {
        self.write(
            "tool_result",
            agent,
            fields(json!({ "tool": tool_name, "result": result })),
        );
    }
}

impl Drop for JsonlAgentEventLog {
    fn drop(&mut self) {
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        let _ = writer.flush();
    }
}
