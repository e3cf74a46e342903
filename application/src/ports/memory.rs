//! Memory port
//!
//! Key-value-like recall store keyed by agent namespace. Agents with a memory
//! attached fold recalled records into their prompt and remember each result.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Namespace visible to every agent when `include_shared` is set.
pub const SHARED_NAMESPACE: &str = "shared";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Memory store unavailable: {0}")]
    Unavailable(String),

    #[error("Memory operation failed: {0}")]
    OperationFailed(String),
}

/// One recalled memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    pub id: String,
    pub content: String,
    /// Namespace the record was stored under
    pub agent: String,
    /// Higher is more relevant; scale is store-specific
    pub relevance: f32,
}

#[async_trait]
pub trait MemoryPort: Send + Sync {
    /// Store `content` under `agent`, returning the record id.
    async fn remember(&self, content: &str, agent: &str) -> Result<String, MemoryError>;

    /// Records relevant to `query`, most relevant first.
    async fn recall(
        &self,
        query: &str,
        agent: &str,
        include_shared: bool,
        limit: usize,
    ) -> Result<Vec<MemoryRecord>, MemoryError>;
}
