//! Safety confirmation port.
//!
//! The safety interlock asks this port before a hazardous tool runs while
//! safety mode is on.
//!
//! # Architecture
//!
//! - **Port**: [`SafetyConfirmationPort`] - defined here in application layer
//! - **Adapter**: `InteractiveConfirmation` - implemented in presentation layer
//!
//! # Built-in Implementations
//!
//! - [`AutoRejectConfirmation`] - Always returns [`ConfirmationDecision::Reject`]
//! - [`AutoApproveConfirmation`] - Always returns [`ConfirmationDecision::Approve`]

use async_trait::async_trait;
use squadron_domain::ToolArgs;
use thiserror::Error;

/// Operator answer to a confirmation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationDecision {
    Approve,
    Reject,
}

/// Failure while asking for confirmation (not a negative answer).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfirmationError {
    /// User cancelled the prompt (e.g., closed stdin).
    #[error("Confirmation cancelled")]
    Cancelled,
    /// Terminal read/write failure.
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Port for soliciting operator approval of a hazardous tool call.
#[async_trait]
pub trait SafetyConfirmationPort: Send + Sync {
    /// Ask whether `tool_name` may run with `args`.
    ///
    /// Only `Ok(ConfirmationDecision::Approve)` lets the call proceed.
    async fn confirm(
        &self,
        tool_name: &str,
        args: &ToolArgs,
    ) -> Result<ConfirmationDecision, ConfirmationError>;
}

/// Denies every hazardous call.
///
/// This is the safest non-interactive mode and the default.
pub struct AutoRejectConfirmation;

#[async_trait]
impl SafetyConfirmationPort for AutoRejectConfirmation {
    async fn confirm(
        &self,
        _tool_name: &str,
        _args: &ToolArgs,
    ) -> Result<ConfirmationDecision, ConfirmationError> {
        Ok(ConfirmationDecision::Reject)
    }
}

/// Approves every hazardous call.
///
/// # Warning
///
/// **Use with caution!** Unlike god mode the interlock is still consulted,
/// but nothing is actually blocked. Only use in a sandbox.
pub struct AutoApproveConfirmation;

#[async_trait]
impl SafetyConfirmationPort for AutoApproveConfirmation {
    async fn confirm(
        &self,
        _tool_name: &str,
        _args: &ToolArgs,
    ) -> Result<ConfirmationDecision, ConfirmationError> {
        Ok(ConfirmationDecision::Approve)
    }
}
