//! Exposes bridged provider tools as an [`ExternalToolSource`].

use super::bridge::{McpBridge, McpServerConfig, RemoteToolHandle};
use async_trait::async_trait;
use futures::future::join_all;
use squadron_application::{ExternalToolSource, ToolSourceError};
use squadron_domain::{RegisteredTool, Tool, ToolArgs, ToolDefinition, ToolError, ToolOutput};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A remote tool invoked through the bridge.
pub struct McpRemoteTool {
    bridge: Arc<McpBridge>,
    local_name: String,
}

impl McpRemoteTool {
    pub fn new(bridge: Arc<McpBridge>, local_name: impl Into<String>) -> Self {
        Self {
            bridge,
            local_name: local_name.into(),
        }
    }
}

#[async_trait]
impl Tool for McpRemoteTool {
    async fn invoke(&self, args: &ToolArgs) -> Result<ToolOutput, ToolError> {
        let text = self.bridge.call_tool(&self.local_name, args).await?;
        Ok(ToolOutput::Value(serde_json::Value::String(text)))
    }
}

/// Every configured provider, discovered concurrently.
pub struct McpToolSource {
    bridge: Arc<McpBridge>,
    servers: BTreeMap<String, McpServerConfig>,
}

impl McpToolSource {
    pub fn new(bridge: Arc<McpBridge>, servers: BTreeMap<String, McpServerConfig>) -> Self {
        Self { bridge, servers }
    }

    fn register_handle(&self, handle: RemoteToolHandle) -> RegisteredTool {
        let mut definition = ToolDefinition::new(
            handle.local_name.clone(),
            format!("[{}] {}", handle.server_name, handle.description),
        )
        .with_hazard(handle.config.is_hazardous(&handle.original_name));
        if let Some(schema) = handle.input_schema {
            definition = definition.with_input_schema(schema);
        }
        RegisteredTool::new(
            definition,
            Arc::new(McpRemoteTool::new(self.bridge.clone(), handle.local_name)),
        )
    }
}

#[async_trait]
impl ExternalToolSource for McpToolSource {
    async fn load_tools(&self) -> Result<Vec<RegisteredTool>, ToolSourceError> {
        let discovered = join_all(
            self.servers
                .iter()
                .map(|(name, config)| self.bridge.list_tools(name, config)),
        )
        .await;

        Ok(discovered
            .into_iter()
            .flatten()
            .map(|handle| self.register_handle(handle))
            .collect())
    }
}
