//! Use cases
//!
//! ```text
//! Delegator ──▶ AgentNode ──▶ Brain::think ──▶ Brain::execute ──▶ Tool
//!                                                   │
//!                                            SafetyInterlock
//! ```

pub mod agent_node;
pub mod brain;
pub mod delegator;
pub mod safety;

#[cfg(test)]
pub(crate) mod test_support;
