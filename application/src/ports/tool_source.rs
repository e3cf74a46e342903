//! External tool source port
//!
//! A source discovers tools hosted outside the process (provider
//! subprocesses) and hands them back as ready-to-register entries. The brain
//! loads its source lazily, once, before the first `think`.

use async_trait::async_trait;
use squadron_domain::RegisteredTool;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolSourceError {
    #[error("Tool discovery failed: {0}")]
    DiscoveryFailed(String),

    #[error("Tool source misconfigured: {0}")]
    Misconfigured(String),
}

#[async_trait]
pub trait ExternalToolSource: Send + Sync {
    /// Discover every tool this source can provide.
    ///
    /// Providers that cannot be reached should be skipped, not fail the whole
    /// load; an `Err` means the source as a whole is unusable.
    async fn load_tools(&self) -> Result<Vec<RegisteredTool>, ToolSourceError>;
}
