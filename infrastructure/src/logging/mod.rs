//! Logging infrastructure: structured agent event logging.
//!
//! Provides [`JsonlAgentEventLog`], a JSONL file writer that implements
//! the [`AgentEventSink`](squadron_application::AgentEventSink) port.

mod jsonl_events;

pub use jsonl_events::JsonlAgentEventLog;
