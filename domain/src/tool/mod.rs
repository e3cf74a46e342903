//! Tool domain module
//!
//! This module defines how agents reach beyond text generation: every
//! capability is a [`Tool`] registered under a unique name together with a
//! [`ToolDefinition`] (description and hazard flag).
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolRegistry │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (name→tool)  │    │ (invocation) │    │ (text+files) │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! # Result normalization
//!
//! Tools return a [`ToolOutput`]. A structured [`ToolResult`] (or a raw JSON
//! object shaped like one) passes through untouched; any other value is
//! stringified and wrapped as `Tool Output: <value>` with no files.
//!
//! # Hazard flag
//!
//! | Hazardous | Examples | Gate |
//! |-----------|----------|------|
//! | no  | `read_file`, most remote tools | none |
//! | yes | `write_file`, `run_command` | safety interlock (confirmation unless god mode) |
//!
//! # Architecture
//!
//! - **Domain** (this module): definitions, registry, result shaping. No I/O.
//! - **Application**: the brain that routes decisions into the registry.
//! - **Infrastructure**: builtin tools and remote tools bridged from
//!   external provider processes.

pub mod entities;
pub mod registry;
pub mod traits;
pub mod value_objects;

pub use entities::{ArgsExt, ToolArgs, ToolCall, ToolDefinition};
pub use registry::{RegisteredTool, ToolRegistry};
pub use traits::{FnTool, Tool, tool_fn};
pub use value_objects::{ToolError, ToolOutput, ToolResult};
