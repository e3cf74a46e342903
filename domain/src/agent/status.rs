//! Live agent status snapshot.

use serde::{Deserialize, Serialize};

/// Whether an agent has a task in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityState {
    Active,
    Idle,
}

impl ActivityState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityState::Active => "active",
            ActivityState::Idle => "idle",
        }
    }
}

impl std::fmt::Display for ActivityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStatus {
    pub name: String,
    pub role: String,
    pub status: ActivityState,
    pub current_task: Option<String>,
    pub current_thought: Option<String>,
    pub current_tool: Option<String>,
}

impl AgentStatus {
    pub fn is_active(&self) -> bool {
        self.status == ActivityState::Active
    }
}
