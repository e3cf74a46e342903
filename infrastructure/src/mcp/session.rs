//! A single handshaken conversation with a tool provider.

use super::bridge::McpServerConfig;
use super::error::{BridgeError, Result};
use super::protocol::{
    CallToolParams, CallToolResult, InitializeParams, ListToolsResult, McpTool,
};
use super::transport::StdioTransport;
use squadron_domain::ToolArgs;
use tracing::debug;

pub struct McpSession {
    transport: StdioTransport,
}

impl McpSession {
    /// Spawn the provider and complete the `initialize` handshake.
    pub async fn connect(server: &str, config: &McpServerConfig) -> Result<Self> {
        let mut transport = StdioTransport::spawn(server, config)?;

        let params = serde_json::to_value(InitializeParams::default())?;
        let result = transport.request("initialize", Some(params)).await?;
        debug!(
            "Tool provider '{}' initialized (protocol {})",
            server,
            result
                .get("protocolVersion")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown")
        );
        transport.notify("notifications/initialized", None).await?;

        Ok(Self { transport })
    }

    /// List every tool, following `nextCursor` until the last page.
    pub async fn list_tools(&mut self) -> Result<Vec<McpTool>> {
        let mut tools = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let params = cursor
                .as_ref()
                .map(|c| serde_json::json!({ "cursor": c }));
            let result = self.transport.request("tools/list", params).await?;
            let page: ListToolsResult = serde_json::from_value(result)
                .map_err(|e| BridgeError::UnexpectedResponse(format!("tools/list: {}", e)))?;
            tools.extend(page.tools);
            match page.next_cursor {
                Some(next) if !next.is_empty() => cursor = Some(next),
                _ => break,
            }
        }
        Ok(tools)
    }

    pub async fn call_tool(&mut self, name: &str, args: &ToolArgs) -> Result<CallToolResult> {
        let params = serde_json::to_value(CallToolParams {
            name,
            arguments: args,
        })?;
        let result = self.transport.request("tools/call", Some(params)).await?;
        serde_json::from_value(result)
            .map_err(|e| BridgeError::UnexpectedResponse(format!("tools/call: {}", e)))
    }
}
