//! Agent domain module
//!
//! Identity, delegation metadata, bounded task history, live status and the
//! routing decision produced by the brain.

pub mod decision;
pub mod delegation;
pub mod history;
pub mod profile;
pub mod status;

pub use decision::{Decision, DecisionParseError, FALLBACK_REPLY, parse_decision, strip_code_fences};
pub use delegation::DelegationContext;
pub use history::{DEFAULT_HISTORY_CAPACITY, TaskHistory, TaskHistoryEntry};
pub use profile::{AgentProfile, default_roster};
pub use status::{ActivityState, AgentStatus};
