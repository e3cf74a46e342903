//! File operation tools: read_file, write_file

use async_trait::async_trait;
use serde_json::json;
use squadron_domain::{ArgsExt, Tool, ToolArgs, ToolDefinition, ToolError, ToolOutput, ToolResult};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

/// Tool name constants
pub const READ_FILE: &str = "read_file";
pub const WRITE_FILE: &str = "write_file";

/// Maximum file size to read (10 MB)
const MAX_READ_SIZE: u64 = 10 * 1024 * 1024;

pub fn read_file_definition() -> ToolDefinition {
    ToolDefinition::new(
        READ_FILE,
        "Read a text file. Args: path, offset? (first line, 0-indexed), limit? (max lines)",
    )
    .with_input_schema(json!({
        "type": "object",
        "properties": {
            "path": {"type": "string"},
            "offset": {"type": "integer", "minimum": 0},
            "limit": {"type": "integer", "minimum": 0}
        },
        "required": ["path"]
    }))
}

pub fn write_file_definition() -> ToolDefinition {
    ToolDefinition::new(
        WRITE_FILE,
        "Write content to a file, replacing it if it exists. Args: path, content, create_dirs?",
    )
    .hazardous()
    .with_input_schema(json!({
        "type": "object",
        "properties": {
            "path": {"type": "string"},
            "content": {"type": "string"},
            "create_dirs": {"type": "boolean"}
        },
        "required": ["path", "content"]
    }))
}

fn io_error(path: &str, action: &str, e: std::io::Error) -> ToolError {
    match e.kind() {
        ErrorKind::NotFound => ToolError::NotFound(path.to_string()),
        ErrorKind::PermissionDenied => ToolError::PermissionDenied(path.to_string()),
        _ => ToolError::ExecutionFailed(format!("Failed to {} '{}': {}", action, path, e)),
    }
}

fn non_negative(args: &ToolArgs, key: &str) -> Result<Option<usize>, ToolError> {
    match args.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .map(|n| Some(n as usize))
            .ok_or_else(|| {
                ToolError::InvalidArgument(format!("{} must be a non-negative integer", key))
            }),
    }
}

pub struct ReadFileTool;

#[async_trait]
impl Tool for ReadFileTool {
    async fn invoke(&self, args: &ToolArgs) -> Result<ToolOutput, ToolError> {
        let path_str = args.require_str("path")?;
        let offset = non_negative(args, "offset")?.unwrap_or(0);
        let limit = non_negative(args, "limit")?;

        let metadata = fs::metadata(path_str)
            .await
            .map_err(|e| io_error(path_str, "read", e))?;
        if !metadata.is_file() {
            return Err(ToolError::InvalidArgument(format!(
                "'{}' is not a file",
                path_str
            )));
        }
        if metadata.len() > MAX_READ_SIZE {
            return Err(ToolError::InvalidArgument(format!(
                "File too large ({} bytes). Maximum size is {} bytes",
                metadata.len(),
                MAX_READ_SIZE
            )));
        }

        let content = fs::read_to_string(path_str)
            .await
            .map_err(|e| io_error(path_str, "read", e))?;

        let output = if offset > 0 || limit.is_some() {
            let lines = content.lines().skip(offset);
            match limit {
                Some(limit) => lines.take(limit).collect::<Vec<_>>().join("\n"),
                None => lines.collect::<Vec<_>>().join("\n"),
            }
        } else {
            content
        };

        Ok(ToolResult::text(output).into())
    }
}

pub struct WriteFileTool;

#[async_trait]
impl Tool for WriteFileTool {
    async fn invoke(&self, args: &ToolArgs) -> Result<ToolOutput, ToolError> {
        let path_str = args.require_str("path")?;
        let content = args.require_str("content")?;
        let path = Path::new(path_str);

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            if args.get_bool("create_dirs").unwrap_or(false) {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| io_error(path_str, "create parent directories for", e))?;
            } else {
                return Err(ToolError::NotFound(format!(
                    "Parent directory does not exist: {}",
                    parent.display()
                )));
            }
        }

        fs::write(path, content)
            .await
            .map_err(|e| io_error(path_str, "write", e))?;

        Ok(ToolResult::text(format!(
            "Successfully wrote {} bytes to {}",
            content.len(),
            path_str
        ))
        .with_file(path_str)
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use squadron_domain::ToolCall;
    use std::io::Write;
    use tempfile::NamedTempFile;

    async fn run(tool: &dyn Tool, call: ToolCall) -> Result<ToolResult, ToolError> {
        tool.invoke(&call.args).await.map(ToolOutput::into_tool_result)
    }

    #[tokio::test]
    async fn test_read_file_success() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "Hello, World!").unwrap();
        let path = temp_file.path().to_str().unwrap();

        let result = run(&ReadFileTool, ToolCall::new(READ_FILE).with_arg("path", path))
            .await
            .unwrap();
        assert_eq!(result.text, "Hello, World!\n");
        assert!(result.files.is_empty());
    }

    #[tokio::test]
    async fn test_read_file_not_found() {
        let err = run(
            &ReadFileTool,
            ToolCall::new(READ_FILE).with_arg("path", "/nonexistent/file.txt"),
        )
        .await
        .unwrap_err();
        assert_eq!(err, ToolError::NotFound("/nonexistent/file.txt".into()));
    }

    #[tokio::test]
    async fn test_read_file_with_offset_and_limit() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "line1\nline2\nline3\nline4\nline5").unwrap();
        let path = temp_file.path().to_str().unwrap();

        let call = ToolCall::new(READ_FILE)
            .with_arg("path", path)
            .with_arg("offset", 1)
            .with_arg("limit", 2);
        let result = run(&ReadFileTool, call).await.unwrap();
        assert_eq!(result.text, "line2\nline3");
    }

    #[tokio::test]
    async fn test_read_file_rejects_bad_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let dir_path = dir.path().to_str().unwrap();

        let err = run(&ReadFileTool, ToolCall::new(READ_FILE)).await.unwrap_err();
        assert_eq!(err, ToolError::MissingArgument("path".into()));

        let err = run(&ReadFileTool, ToolCall::new(READ_FILE).with_arg("path", dir_path))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument(_)));

        let call = ToolCall::new(READ_FILE)
            .with_arg("path", dir_path)
            .with_arg("offset", -3);
        let err = run(&ReadFileTool, call).await.unwrap_err();
        assert_eq!(
            err,
            ToolError::InvalidArgument("offset must be a non-negative integer".into())
        );
    }

    #[tokio::test]
    async fn test_write_file_success() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("test.txt");
        let path = file_path.to_str().unwrap();

        let call = ToolCall::new(WRITE_FILE)
            .with_arg("path", path)
            .with_arg("content", "Hello, World!");
        let result = run(&WriteFileTool, call).await.unwrap();

        assert_eq!(result.text, format!("Successfully wrote 13 bytes to {}", path));
        assert_eq!(result.files, vec![path.to_string()]);
        assert_eq!(std::fs::read_to_string(&file_path).unwrap(), "Hello, World!");
    }

    #[tokio::test]
    async fn test_write_file_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("nested").join("deep").join("out.txt");
        let path = file_path.to_str().unwrap();

        let call = ToolCall::new(WRITE_FILE)
            .with_arg("path", path)
            .with_arg("content", "x");
        let err = run(&WriteFileTool, call.clone()).await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));

        let result = run(&WriteFileTool, call.with_arg("create_dirs", true))
            .await
            .unwrap();
        assert_eq!(result.files.len(), 1);
        assert!(file_path.exists());
    }

    #[test]
    fn test_definitions() {
        assert!(!read_file_definition().hazardous);
        assert!(write_file_definition().hazardous);
        assert_eq!(
            write_file_definition().input_schema.unwrap()["required"],
            json!(["path", "content"])
        );
    }
}
