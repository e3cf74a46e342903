//! Command execution tool: run_command

use async_trait::async_trait;
use serde_json::json;
use squadron_domain::{ArgsExt, Tool, ToolArgs, ToolDefinition, ToolError, ToolOutput, ToolResult};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Tool name constant
pub const RUN_COMMAND: &str = "run_command";

/// Default timeout for command execution (60 seconds)
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Maximum output size (1 MB)
const MAX_OUTPUT_SIZE: usize = 1024 * 1024;

pub fn run_command_definition() -> ToolDefinition {
    ToolDefinition::new(
        RUN_COMMAND,
        "Execute a shell command and return its output. Args: command, working_dir?, timeout_secs? (default 60)",
    )
    .hazardous()
    .with_input_schema(json!({
        "type": "object",
        "properties": {
            "command": {"type": "string"},
            "working_dir": {"type": "string"},
            "timeout_secs": {"type": "integer", "minimum": 1}
        },
        "required": ["command"]
    }))
}

pub struct RunCommandTool;

#[async_trait]
impl Tool for RunCommandTool {
    async fn invoke(&self, args: &ToolArgs) -> Result<ToolOutput, ToolError> {
        let command_str = args.require_str("command")?;

        let timeout_secs = match args.get("timeout_secs") {
            None => DEFAULT_TIMEOUT_SECS,
            Some(value) => value.as_u64().filter(|&s| s > 0).ok_or_else(|| {
                ToolError::InvalidArgument("timeout_secs must be a positive integer".into())
            })?,
        };

        let mut cmd = if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/C", command_str]);
            c
        } else {
            let mut c = Command::new("sh");
            c.args(["-c", command_str]);
            c
        };

        if let Some(dir) = args.get_str("working_dir") {
            let path = Path::new(dir);
            if !path.exists() {
                return Err(ToolError::NotFound(format!(
                    "Working directory does not exist: {}",
                    dir
                )));
            }
            if !path.is_dir() {
                return Err(ToolError::InvalidArgument(format!(
                    "'{}' is not a directory",
                    dir
                )));
            }
            cmd.current_dir(path);
        }

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!("run_command: {}", command_str);
        let child = cmd
            .spawn()
            .map_err(|e| ToolError::ExecutionFailed(format!("Failed to spawn command: {}", e)))?;

        let output = tokio::time::timeout(
            Duration::from_secs(timeout_secs),
            child.wait_with_output(),
        )
        .await
        .map_err(|_| {
            ToolError::Timeout(format!(
                "Command timed out after {} seconds: {}",
                timeout_secs, command_str
            ))
        })?
        .map_err(|e| ToolError::ExecutionFailed(format!("Failed to wait for command: {}", e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        let mut combined_output = String::new();
        if !stdout.is_empty() {
            combined_output.push_str(&stdout);
        }
        if !stderr.is_empty() {
            if !combined_output.is_empty() {
                combined_output.push_str("\n--- stderr ---\n");
            }
            combined_output.push_str(&stderr);
        }

        if combined_output.len() > MAX_OUTPUT_SIZE {
            let cut = squadron_domain::util::truncate_chars(&combined_output, MAX_OUTPUT_SIZE).len();
            combined_output.truncate(cut);
            combined_output.push_str("\n... (output truncated)");
        }

        // Non-zero exit is still a result; the agent decides what to do with it
        let text = if output.status.success() {
            combined_output
        } else {
            format!(
                "Command exited with code {}\n{}",
                output.status.code().unwrap_or(-1),
                combined_output
            )
        };

        Ok(ToolResult::text(text).into())
    }
}
