//! Tool sources: `[builtin_tools]` and `[mcp.servers.<name>]`.
//!
//! ```toml
//! [builtin_tools]
//! enabled = true
//!
//! [mcp.servers.filesystem]
//! command = "npx"
//! args = ["-y", "@modelcontextprotocol/server-filesystem", "."]
//! timeout_secs = 30
//! hazardous_tools = ["write_file"]
//! ```

use crate::mcp::McpServerConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBuiltinToolsConfig {
    pub enabled: bool,
}

impl Default for FileBuiltinToolsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMcpConfig {
    /// Provider name -> launch settings; tools are exposed as `{name}_{tool}`
    pub servers: BTreeMap<String, McpServerConfig>,
}
