//! Stdio transport for tool provider subprocesses.
//!
//! One JSON-RPC message per line. The transport owns the child process and
//! kills it when dropped, so a session that times out or errors never leaves
//! a provider running.

use super::bridge::McpServerConfig;
use super::error::{BridgeError, Result};
use super::protocol::{
    JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, JsonRpcResponseOut, MessageKind,
    classify_message,
};
use serde::Serialize;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::{debug, trace};

pub struct StdioTransport {
    server: String,
    child: Child,
    writer: BufWriter<ChildStdin>,
    reader: BufReader<ChildStdout>,
}

impl StdioTransport {
    /// Spawn the provider process described by `config`.
    pub fn spawn(server: &str, config: &McpServerConfig) -> Result<Self> {
        debug!("Spawning tool provider '{}': {} {:?}", server, config.command, config.args);

        let mut cmd = Command::new(&config.command);
        cmd.args(&config.args)
            .envs(&config.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());

        // Linux: request kernel to send SIGTERM to child when parent dies.
        #[cfg(target_os = "linux")]
        unsafe {
            cmd.pre_exec(|| {
                libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM);
                Ok(())
            });
        }

        let mut child = cmd.spawn().map_err(|source| BridgeError::SpawnError {
            server: server.to_string(),
            source,
        })?;

        let stdin = child.stdin.take().ok_or_else(|| BridgeError::SpawnError {
            server: server.to_string(),
            source: std::io::Error::other("Failed to capture stdin"),
        })?;
        let stdout = child.stdout.take().ok_or_else(|| BridgeError::SpawnError {
            server: server.to_string(),
            source: std::io::Error::other("Failed to capture stdout"),
        })?;

        Ok(Self {
            server: server.to_string(),
            child,
            writer: BufWriter::new(stdin),
            reader: BufReader::new(stdout),
        })
    }

    /// Send a request and wait for the response carrying its id.
    ///
    /// Notifications that arrive in between are skipped; requests from the
    /// provider are answered (`ping` with an empty result, anything else with
    /// method-not-found) so the provider is never left waiting.
    pub async fn request(
        &mut self,
        method: &str,
        params: Option<serde_json::Value>,
    ) -> Result<serde_json::Value> {
        let request = JsonRpcRequest::new(method, params);
        let request_id = request.id;
        self.write_message(&request).await?;

        loop {
            let message = self.read_message().await?;
            match classify_message(&message) {
                MessageKind::Response => {
                    if message.get("id").and_then(|v| v.as_u64()) != Some(request_id) {
                        debug!("[{}] Ignoring response for another request", self.server);
                        continue;
                    }
                    let response: JsonRpcResponse = serde_json::from_value(message)?;
                    if let Some(error) = response.error {
                        return Err(BridgeError::RpcError {
                            code: error.code,
                            message: error.message,
                        });
                    }
                    return Ok(response.result.unwrap_or(serde_json::Value::Null));
                }
                MessageKind::IncomingRequest => {
                    let id = message.get("id").cloned().unwrap_or(serde_json::Value::Null);
                    let method = message
                        .get("method")
                        .and_then(|m| m.as_str())
                        .unwrap_or_default();
                    let reply = if method == "ping" {
                        JsonRpcResponseOut::success(id, serde_json::json!({}))
                    } else {
                        JsonRpcResponseOut::method_not_found(id, method)
                    };
                    self.write_message(&reply).await?;
                }
                MessageKind::Notification => {
                    trace!("[{}] Notification: {}", self.server, message);
                }
            }
        }
    }

    /// Send a notification (no response expected).
    pub async fn notify(&mut self, method: &str, params: Option<serde_json::Value>) -> Result<()> {
        self.write_message(&JsonRpcNotification::new(method, params))
            .await
    }

    async fn write_message<T: Serialize>(&mut self, message: &T) -> Result<()> {
        let json = serde_json::to_string(message)?;
        trace!("[{}] -> {}", self.server, json);
        self.writer.write_all(json.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    async fn read_message(&mut self) -> Result<serde_json::Value> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line).await? == 0 {
                return Err(BridgeError::TransportClosed);
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            trace!("[{}] <- {}", self.server, trimmed);
            match serde_json::from_str(trimmed) {
                Ok(value) => return Ok(value),
                Err(e) => debug!("[{}] Skipping non-JSON line: {}", self.server, e),
            }
        }
    }
}

impl Drop for StdioTransport {
    fn drop(&mut self) {
        debug!("Closing tool provider '{}'", self.server);
        let _ = self.child.start_kill();
    }
}
