//! Infrastructure layer for squadron
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the external tool bridge, builtin tools,
//! the language model client, memory and event log adapters, and
//! configuration file loading.

pub mod config;
pub mod llm;
pub mod logging;
pub mod mcp;
pub mod memory;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, ConfirmMode, FileConfig};
pub use llm::OpenAiCompatibleModel;
pub use logging::JsonlAgentEventLog;
pub use mcp::{BridgeError, McpBridge, McpServerConfig, McpToolSource, RemoteToolHandle};
pub use memory::InMemoryRecall;
pub use tools::builtin_tools;
