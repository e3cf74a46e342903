//! Tool domain value objects — results and errors
//!
//! These types form the **output side** of the tool pipeline. Every
//! invocation ends in a [`ToolResult`]: either the tool produced one
//! directly, or its raw [`ToolOutput`] is coerced into one.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix applied to raw (non-[`ToolResult`]) tool output.
pub const TOOL_OUTPUT_PREFIX: &str = "Tool Output: ";

/// Error raised by a tool invocation.
///
/// The brain never propagates these; it renders them as `Tool Error: <cause>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// A required argument was not supplied
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// An argument was supplied but is unusable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A file, directory or remote resource does not exist
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Access was denied by the OS or the provider
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Runtime failure (I/O error, process failure, provider error)
    #[error("{0}")]
    ExecutionFailed(String),

    /// The operation exceeded its time budget
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

/// Normalized result of any tool execution or reply.
///
/// `text` is always present; `files` lists paths produced by the tool
/// (screenshots, written files) and is usually empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    pub text: String,
    #[serde(default)]
    pub files: Vec<String>,
}

impl ToolResult {
    /// A text-only result
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            files: Vec::new(),
        }
    }

    /// Attach a produced file (builder pattern)
    pub fn with_file(mut self, path: impl Into<String>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Interpret a raw JSON value as a [`ToolResult`] if it has that shape.
    ///
    /// A value is ToolResult-shaped when it is an object with a string `text`
    /// field. `files`, when present, must be an array of strings.
    pub fn from_shaped_value(value: &serde_json::Value) -> Option<Self> {
        let object = value.as_object()?;
        let text = object.get("text")?.as_str()?;
        let files = match object.get("files") {
            None | Some(serde_json::Value::Null) => Vec::new(),
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()?,
            Some(_) => return None,
        };
        Some(Self {
            text: text.to_string(),
            files,
        })
    }
}

/// What a tool hands back before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// Already a structured result; passed through verbatim
    Result(ToolResult),
    /// Any other value; wrapped as `Tool Output: <value>` unless ToolResult-shaped
    Value(serde_json::Value),
}

impl ToolOutput {
    /// Coerce into a [`ToolResult`].
    pub fn into_tool_result(self) -> ToolResult {
        match self {
            ToolOutput::Result(result) => result,
            ToolOutput::Value(value) => match ToolResult::from_shaped_value(&value) {
                Some(result) => result,
                None => ToolResult::text(format!("{}{}", TOOL_OUTPUT_PREFIX, render_value(&value))),
            },
        }
    }
}

/// Strings render bare; everything else renders as compact JSON.
fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl From<ToolResult> for ToolOutput {
    fn from(result: ToolResult) -> Self {
        ToolOutput::Result(result)
    }
}

impl From<serde_json::Value> for ToolOutput {
    fn from(value: serde_json::Value) -> Self {
        ToolOutput::Value(value)
    }
}

impl From<String> for ToolOutput {
    fn from(text: String) -> Self {
        ToolOutput::Value(serde_json::Value::String(text))
    }
}

impl From<&str> for ToolOutput {
    fn from(text: &str) -> Self {
        ToolOutput::Value(serde_json::Value::String(text.to_string()))
    }
}
