//! Application layer for squadron
//!
//! This crate contains the decision engine, agent nodes, delegation, and the
//! port definitions their collaborators implement.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BrainConfig;
pub use ports::{
    agent_events::{AgentEventSink, FanoutEvents, NoAgentEvents},
    language_model::{LanguageModel, ModelError},
    memory::{MemoryError, MemoryPort, MemoryRecord, SHARED_NAMESPACE},
    safety_confirmation::{
        AutoApproveConfirmation, AutoRejectConfirmation, ConfirmationDecision, ConfirmationError,
        SafetyConfirmationPort,
    },
    tool_source::{ExternalToolSource, ToolSourceError},
};
pub use use_cases::{
    agent_node::AgentNode,
    brain::{Brain, JSON_RESPONSE_MARKER, UNKNOWN_ACTION},
    delegator::{AgentRoster, Assignment, Delegator},
    safety::{SafetyInterlock, SafetySwitch},
};
