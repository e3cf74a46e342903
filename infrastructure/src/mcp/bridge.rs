//! Bridge to external tool providers.
//!
//! Every operation owns its subprocess: spawn, handshake, one request,
//! close. Nothing is pooled, so concurrent calls never share state. The
//! bridge only remembers which local tool name maps to which provider.

use super::error::{BridgeError, Result};
use super::session::McpSession;
use serde::{Deserialize, Serialize};
use squadron_domain::ToolArgs;
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::RwLock;
use std::time::Duration;
use tracing::{debug, info, warn};

fn default_timeout_secs() -> u64 {
    60
}

/// How to launch one tool provider (`[mcp.servers.<name>]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpServerConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Added on top of the inherited environment
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    /// Upper bound for a whole session: spawn, handshake and request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Treat every tool from this provider as hazardous
    #[serde(default)]
    pub hazardous: bool,
    /// Remote tool names that need confirmation
    #[serde(default)]
    pub hazardous_tools: Vec<String>,
}

impl McpServerConfig {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
            timeout_secs: default_timeout_secs(),
            hazardous: false,
            hazardous_tools: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn is_hazardous(&self, tool_name: &str) -> bool {
        self.hazardous || self.hazardous_tools.iter().any(|t| t == tool_name)
    }
}

/// A discovered remote tool, addressable locally as `{server}_{tool}`.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteToolHandle {
    pub local_name: String,
    pub server_name: String,
    pub original_name: String,
    pub config: McpServerConfig,
    pub description: String,
    pub input_schema: Option<serde_json::Value>,
}

#[derive(Default)]
pub struct McpBridge {
    handles: RwLock<HashMap<String, RemoteToolHandle>>,
}

impl McpBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover the tools of one provider.
    ///
    /// Discovery is best-effort: a missing binary or any protocol failure is
    /// logged and yields an empty list.
    pub async fn list_tools(
        &self,
        server_name: &str,
        config: &McpServerConfig,
    ) -> Vec<RemoteToolHandle> {
        match self.try_list_tools(server_name, config).await {
            Ok(handles) => handles,
            Err(BridgeError::CommandNotFound(command)) => {
                warn!(
                    "Skipping tool provider '{}': command '{}' not found",
                    server_name, command
                );
                Vec::new()
            }
            Err(e) => {
                warn!("Tool discovery failed for '{}': {}", server_name, e);
                Vec::new()
            }
        }
    }

    /// Like [`list_tools`](Self::list_tools) but reports why discovery failed.
    pub async fn try_list_tools(
        &self,
        server_name: &str,
        config: &McpServerConfig,
    ) -> Result<Vec<RemoteToolHandle>> {
        if which::which(&config.command).is_err() {
            return Err(BridgeError::CommandNotFound(config.command.clone()));
        }

        let tools = with_timeout(server_name, config, async {
            let mut session = McpSession::connect(server_name, config).await?;
            session.list_tools().await
        })
        .await?;

        let handles: Vec<RemoteToolHandle> = tools
            .into_iter()
            .map(|tool| RemoteToolHandle {
                local_name: format!("{}_{}", server_name, tool.name),
                server_name: server_name.to_string(),
                description: tool.description.unwrap_or_default(),
                input_schema: tool.input_schema,
                original_name: tool.name,
                config: config.clone(),
            })
            .collect();

        {
            let mut map = self.handles.write().unwrap_or_else(|e| e.into_inner());
            for handle in &handles {
                map.insert(handle.local_name.clone(), handle.clone());
            }
        }

        info!(
            "Discovered {} tool(s) from provider '{}'",
            handles.len(),
            server_name
        );
        Ok(handles)
    }

    /// Invoke a previously discovered tool by its local name.
    pub async fn call_tool(&self, local_name: &str, args: &ToolArgs) -> Result<String> {
        let handle = self
            .handle(local_name)
            .ok_or_else(|| BridgeError::ToolNotFound(local_name.to_string()))?;

        debug!(
            "Calling '{}' on provider '{}'",
            handle.original_name, handle.server_name
        );
        let result = with_timeout(&handle.server_name, &handle.config, async {
            let mut session = McpSession::connect(&handle.server_name, &handle.config).await?;
            session.call_tool(&handle.original_name, args).await
        })
        .await?;

        let text = result.render_text();
        if result.is_error {
            return Err(BridgeError::ToolFailed(text));
        }
        Ok(text)
    }

    pub fn handle(&self, local_name: &str) -> Option<RemoteToolHandle> {
        self.handles
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(local_name)
            .cloned()
    }
}

/// Bound a whole session. Dropping the session on expiry kills the child.
async fn with_timeout<T>(
    server_name: &str,
    config: &McpServerConfig,
    session: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::time::timeout(Duration::from_secs(config.timeout_secs), session)
        .await
        .map_err(|_| BridgeError::Timeout {
            server: server_name.to_string(),
            secs: config.timeout_secs,
        })?
}

#[cfg(all(test, unix))]
pub(crate) mod tests {
    use super::*;
    use std::path::Path;

    /// A provider scripted in `sh`: answers the handshake, lists four tools
    /// over two pages (with a notification and a ping in between), and
    /// implements `echo`, `fail`, `slow` and `pid` (reports the provider's
    /// process id after a short pause).
    pub(crate) const FAKE_SERVER: &str = r#"
while IFS= read -r line; do
  id=$(printf '%s\n' "$line" | sed -n 's/^{"jsonrpc":"2.0","id":\([0-9]*\).*/\1/p')
  case "$line" in
    *'"method":"initialize"'*)
      printf '{"jsonrpc":"2.0","id":%s,"result":{"protocolVersion":"2024-11-05","capabilities":{"tools":{}},"serverInfo":{"name":"fake","version":"0.1"}}}\n' "$id" ;;
    *'"method":"tools/list"'*'"cursor":"2"'*)
      printf '{"jsonrpc":"2.0","id":%s,"result":{"tools":[{"name":"slow","description":"Never finishes"},{"name":"pid","description":"Report the process id"}]}}\n' "$id" ;;
    *'"method":"tools/list"'*)
      printf '{"jsonrpc":"2.0","method":"notifications/message","params":{"level":"info","data":"listing"}}\n'
      printf '{"jsonrpc":"2.0","id":"srv-1","method":"ping"}\n'
      printf '{"jsonrpc":"2.0","id":%s,"result":{"tools":[{"name":"echo","description":"Echo a message","inputSchema":{"type":"object"}},{"name":"fail","description":"Always fails"}],"nextCursor":"2"}}\n' "$id" ;;
    *'"method":"tools/call"'*'"name":"echo"'*)
      printf '{"jsonrpc":"2.0","id":%s,"result":{"content":[{"type":"text","text":"echo: ok"},{"type":"text","text":"done"}]}}\n' "$id" ;;
    *'"method":"tools/call"'*'"name":"fail"'*)
      printf '{"jsonrpc":"2.0","id":%s,"result":{"content":[{"type":"text","text":"disk on fire"}],"isError":true}}\n' "$id" ;;
    *'"method":"tools/call"'*'"name":"slow"'*)
      sleep 5 ;;
    *'"method":"tools/call"'*'"name":"pid"'*)
      sleep 1
      printf '{"jsonrpc":"2.0","id":%s,"result":{"content":[{"type":"text","text":"%s"}]}}\n' "$id" "$$" ;;
  esac
done
"#;

    pub(crate) fn fake_server(dir: &Path) -> McpServerConfig {
        let script = dir.join("server.sh");
        std::fs::write(&script, FAKE_SERVER).unwrap();
        McpServerConfig::new("sh").with_args([script.display().to_string()])
    }

    #[tokio::test]
    async fn test_list_tools_follows_pagination() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = McpBridge::new();

        let handles = bridge.list_tools("fake", &fake_server(dir.path())).await;

        let names: Vec<_> = handles.iter().map(|h| h.local_name.as_str()).collect();
        assert_eq!(names, vec!["fake_echo", "fake_fail", "fake_slow", "fake_pid"]);
        assert_eq!(handles[0].original_name, "echo");
        assert_eq!(handles[0].server_name, "fake");
        assert_eq!(handles[0].description, "Echo a message");
        assert_eq!(
            handles[0].input_schema,
            Some(serde_json::json!({"type": "object"}))
        );
        assert!(bridge.handle("fake_slow").is_some());
    }

    #[tokio::test]
    async fn test_call_tool_joins_text_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = McpBridge::new();
        bridge.list_tools("fake", &fake_server(dir.path())).await;

        let mut args = ToolArgs::new();
        args.insert("message".into(), "hi".into());
        let text = bridge.call_tool("fake_echo", &args).await.unwrap();
        assert_eq!(text, "echo: ok\ndone");
    }

    #[tokio::test]
    async fn test_concurrent_calls_get_their_own_provider_process() {
        let dir = tempfile::tempdir().unwrap();
        let config = fake_server(dir.path());
        let bridge = McpBridge::new();
        bridge.list_tools("fake", &config).await;

        let args = ToolArgs::new();
        let (first, second, listed) = tokio::join!(
            bridge.call_tool("fake_pid", &args),
            bridge.call_tool("fake_pid", &args),
            bridge.try_list_tools("fake", &config),
        );

        let first: u32 = first.unwrap().parse().unwrap();
        let second: u32 = second.unwrap().parse().unwrap();
        assert_ne!(first, second);
        assert_ne!(first, std::process::id());
        assert_eq!(listed.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_remote_is_error_becomes_tool_failed() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = McpBridge::new();
        bridge.list_tools("fake", &fake_server(dir.path())).await;

        let err = bridge
            .call_tool("fake_fail", &ToolArgs::new())
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::ToolFailed(ref m) if m == "disk on fire"));
    }

    #[tokio::test]
    async fn test_unknown_local_name_is_not_found() {
        let bridge = McpBridge::new();
        let err = bridge
            .call_tool("fake_missing", &ToolArgs::new())
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::ToolNotFound(ref n) if n == "fake_missing"));
    }

    #[tokio::test]
    async fn test_session_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = McpBridge::new();
        let config = fake_server(dir.path()).with_timeout_secs(1);
        bridge.list_tools("fake", &config).await;

        let err = bridge
            .call_tool("fake_slow", &ToolArgs::new())
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::Timeout { secs: 1, .. }));
    }

    #[tokio::test]
    async fn test_missing_binary_yields_empty_list() {
        let bridge = McpBridge::new();
        let config = McpServerConfig::new("squadron-no-such-provider-binary");

        assert!(bridge.list_tools("ghost", &config).await.is_empty());
        assert!(matches!(
            bridge.try_list_tools("ghost", &config).await,
            Err(BridgeError::CommandNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_provider_exiting_early_yields_empty_list() {
        let bridge = McpBridge::new();
        let config = McpServerConfig::new("sh").with_args(["-c", "exit 0"]);

        assert!(bridge.list_tools("quitter", &config).await.is_empty());
        assert!(matches!(
            bridge.try_list_tools("quitter", &config).await,
            Err(BridgeError::TransportClosed) | Err(BridgeError::Io(_))
        ));
    }

    #[test]
    fn test_server_config_defaults() {
        let config: McpServerConfig = toml::from_str(r#"command = "mcp-fs""#).unwrap();
        assert_eq!(config.timeout_secs, 60);
        assert!(config.args.is_empty());
        assert!(!config.is_hazardous("write"));

        let config: McpServerConfig = toml::from_str(
            r#"
command = "mcp-fs"
hazardous_tools = ["write"]
"#,
        )
        .unwrap();
        assert!(config.is_hazardous("write"));
        assert!(!config.is_hazardous("read"));
    }
}
