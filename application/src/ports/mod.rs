//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod agent_events;
pub mod language_model;
pub mod memory;
pub mod safety_confirmation;
pub mod tool_source;
