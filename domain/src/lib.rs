//! Domain layer for squadron
//!
//! This crate contains the core types of the routing core: tools and their
//! results, the decisions the brain produces, and the identities and
//! bookkeeping of the agents that run those decisions.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Decision
//!
//! Every piece of input is routed to exactly one [`Decision`]: either a direct
//! [`Decision::Reply`] or a [`Decision::ToolCall`] naming a registered tool.
//!
//! ## Tools
//!
//! A tool is a [`Tool`] capability plus a [`ToolDefinition`] (name, description,
//! hazard flag), stored in an insertion-ordered [`ToolRegistry`]. Whatever a tool
//! returns is normalized into a [`ToolResult`].
//!
//! ## Agents
//!
//! An [`AgentProfile`] is a static identity (Marcus the planner, Caleb the
//! implementer). Tasks handed between agents carry a [`DelegationContext`], and
//! each agent keeps a bounded [`TaskHistory`].

pub mod agent;
pub mod tool;
pub mod util;

// Re-export commonly used types
pub use agent::{
    decision::{Decision, DecisionParseError, FALLBACK_REPLY, parse_decision, strip_code_fences},
    delegation::DelegationContext,
    history::{DEFAULT_HISTORY_CAPACITY, TaskHistory, TaskHistoryEntry},
    profile::{AgentProfile, default_roster},
    status::{ActivityState, AgentStatus},
};
pub use tool::{
    entities::{ArgsExt, ToolArgs, ToolCall, ToolDefinition},
    registry::{RegisteredTool, ToolRegistry},
    traits::{FnTool, Tool, tool_fn},
    value_objects::{ToolError, ToolOutput, ToolResult},
};
