//! Routing decision and its strict decoder.
//!
//! Language-model output is untrusted. [`parse_decision`] accepts exactly two
//! shapes and rejects everything else with a [`DecisionParseError`]:
//!
//! ```json
//! {"action": "reply", "content": "..."}
//! {"action": "tool", "tool_name": "...", "args": {...}}
//! ```
//!
//! `args` may be omitted (an empty map is assumed).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tool::entities::ToolArgs;

/// Reply used when the model cannot produce a usable decision.
pub const FALLBACK_REPLY: &str = "I'm having trouble thinking clearly right now.";

/// What the brain decided to do with an input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum Decision {
    #[serde(rename = "reply")]
    Reply { content: String },
    #[serde(rename = "tool")]
    ToolCall {
        tool_name: String,
        #[serde(default)]
        args: ToolArgs,
    },
}

impl Decision {
    pub fn reply(content: impl Into<String>) -> Self {
        Decision::Reply {
            content: content.into(),
        }
    }

    pub fn tool_call(tool_name: impl Into<String>, args: ToolArgs) -> Self {
        Decision::ToolCall {
            tool_name: tool_name.into(),
            args,
        }
    }

    pub fn fallback() -> Self {
        Self::reply(FALLBACK_REPLY)
    }

    /// Tool name when this is a tool call
    pub fn tool_name(&self) -> Option<&str> {
        match self {
            Decision::ToolCall { tool_name, .. } => Some(tool_name),
            Decision::Reply { .. } => None,
        }
    }

    pub fn is_tool_call(&self) -> bool {
        matches!(self, Decision::ToolCall { .. })
    }

    /// Decode an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, DecisionParseError> {
        let action = match value.get("action") {
            None => return Err(DecisionParseError::MissingAction),
            Some(serde_json::Value::String(action)) => action.clone(),
            Some(other) => return Err(DecisionParseError::UnknownAction(other.to_string())),
        };
        if action != "reply" && action != "tool" {
            return Err(DecisionParseError::UnknownAction(action));
        }
        serde_json::from_value(value).map_err(|e| DecisionParseError::Malformed(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecisionParseError {
    #[error("Response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Response has no action field")]
    MissingAction,

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Malformed decision: {0}")]
    Malformed(String),
}

/// Remove a surrounding markdown code fence (```` ```json ```` or ```` ``` ````).
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Strictly decode raw model output into a [`Decision`].
pub fn parse_decision(raw: &str) -> Result<Decision, DecisionParseError> {
    let cleaned = strip_code_fences(raw);
    let value: serde_json::Value =
        serde_json::from_str(cleaned).map_err(|e| DecisionParseError::InvalidJson(e.to_string()))?;
    Decision::from_value(value)
}
