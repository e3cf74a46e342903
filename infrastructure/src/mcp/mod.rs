//! External tool bridge (Model Context Protocol over stdio)
//!
//! Tool providers are subprocesses speaking newline-delimited JSON-RPC 2.0.
//! [`McpBridge`] discovers their tools and invokes them, one subprocess per
//! operation; [`McpToolSource`] plugs the discovered tools into a brain.

pub mod bridge;
pub mod error;
pub mod protocol;
pub mod session;
pub mod source;
pub mod transport;

pub use bridge::{McpBridge, McpServerConfig, RemoteToolHandle};
pub use error::BridgeError;
pub use session::McpSession;
pub use source::{McpRemoteTool, McpToolSource};
