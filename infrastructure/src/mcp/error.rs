//! Error types for the external tool bridge

use squadron_domain::ToolError;
use thiserror::Error;

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors that can occur when talking to a tool provider process
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Failed to spawn tool provider '{server}': {source}")]
    SpawnError {
        server: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Tool provider command not found: {0}")]
    CommandNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("JSON-RPC error (code {code}): {message}")]
    RpcError { code: i64, message: String },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Transport closed")]
    TransportClosed,

    #[error("Tool provider '{server}' did not answer within {secs}s")]
    Timeout { server: String, secs: u64 },

    #[error("Remote tool not found: {0}")]
    ToolNotFound(String),

    #[error("{0}")]
    ToolFailed(String),
}

impl From<BridgeError> for ToolError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::ToolNotFound(name) => ToolError::NotFound(name),
            BridgeError::ToolFailed(message) => ToolError::ExecutionFailed(message),
            BridgeError::Timeout { .. } => ToolError::Timeout(err.to_string()),
            other => ToolError::ExecutionFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_tool_error() {
        assert_eq!(
            ToolError::from(BridgeError::ToolNotFound("fs_read".into())),
            ToolError::NotFound("fs_read".into())
        );
        assert_eq!(
            ToolError::from(BridgeError::ToolFailed("disk full".into())),
            ToolError::ExecutionFailed("disk full".into())
        );
        assert!(matches!(
            ToolError::from(BridgeError::Timeout {
                server: "fs".into(),
                secs: 5
            }),
            ToolError::Timeout(_)
        ));
        assert_eq!(
            ToolError::from(BridgeError::TransportClosed),
            ToolError::ExecutionFailed("Transport closed".into())
        );
    }
}
