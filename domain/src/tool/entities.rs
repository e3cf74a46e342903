//! Tool domain entities

use serde::{Deserialize, Serialize};

use super::value_objects::ToolError;

/// Named arguments passed to a tool, ordered by key.
pub type ToolArgs = serde_json::Map<String, serde_json::Value>;

/// Definition of a tool that can be routed to by the brain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "read_file", "filesystem_list_directory")
    pub name: String,
    /// Human-readable description, shown to the language model
    pub description: String,
    /// Whether the tool needs explicit confirmation while safety mode is on
    #[serde(default)]
    pub hazardous: bool,
    /// JSON Schema of the arguments, when the provider advertises one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<serde_json::Value>,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            hazardous: false,
            input_schema: None,
        }
    }

    /// Mark the tool as hazardous (builder pattern)
    pub fn hazardous(mut self) -> Self {
        self.hazardous = true;
        self
    }

    pub fn with_hazard(mut self, hazardous: bool) -> Self {
        self.hazardous = hazardous;
        self
    }

    pub fn with_input_schema(mut self, schema: serde_json::Value) -> Self {
        self.input_schema = Some(schema);
        self
    }

    /// The `- name: description` line used in the routing prompt
    pub fn prompt_line(&self) -> String {
        format!("- {}: {}", self.name, self.description)
    }
}

/// A request to invoke a tool with arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    #[serde(default)]
    pub args: ToolArgs,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            args: ToolArgs::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }
}

/// Typed accessors for [`ToolArgs`].
///
/// Tools validate their own arguments; these helpers keep that validation
/// short and produce uniform [`ToolError::MissingArgument`] messages.
pub trait ArgsExt {
    fn get_str(&self, key: &str) -> Option<&str>;
    fn get_i64(&self, key: &str) -> Option<i64>;
    fn get_bool(&self, key: &str) -> Option<bool>;

    /// Get a required string argument or fail with [`ToolError::MissingArgument`]
    fn require_str(&self, key: &str) -> Result<&str, ToolError> {
        self.get_str(key)
            .ok_or_else(|| ToolError::MissingArgument(key.to_string()))
    }
}

impl ArgsExt for ToolArgs {
    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }

    fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.as_i64())
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.as_bool())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_definition() {
        let tool = ToolDefinition::new("read_file", "Read file contents");
        assert_eq!(tool.name, "read_file");
        assert!(!tool.hazardous);
        assert_eq!(tool.prompt_line(), "- read_file: Read file contents");

        let tool = ToolDefinition::new("run_command", "Run a shell command").hazardous();
        assert!(tool.hazardous);
    }

    #[test]
    fn test_tool_call_args() {
        let call = ToolCall::new("read_file")
            .with_arg("path", "/test/file.txt")
            .with_arg("limit", 10)
            .with_arg("create_dirs", true);

        assert_eq!(call.tool_name, "read_file");
        assert_eq!(call.args.get_str("path"), Some("/test/file.txt"));
        assert_eq!(call.args.require_str("path").unwrap(), "/test/file.txt");
        assert_eq!(call.args.get_i64("limit"), Some(10));
        assert_eq!(call.args.get_bool("create_dirs"), Some(true));
        assert_eq!(
            call.args.require_str("missing"),
            Err(ToolError::MissingArgument("missing".to_string()))
        );
    }

    #[test]
    fn test_tool_call_deserializes_without_args() {
        let call: ToolCall = serde_json::from_str(r#"{"tool_name": "ping"}"#).unwrap();
        assert_eq!(call.tool_name, "ping");
        assert!(call.args.is_empty());
    }
}
