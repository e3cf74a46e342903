//! Tool capability trait
//!
//! [`Tool`] is the single seam every capability goes through: builtin tools,
//! remote tools bridged from provider processes, and test doubles all
//! implement it. Argument validation belongs to each implementation.

use std::sync::Arc;

use async_trait::async_trait;

use super::entities::ToolArgs;
use super::value_objects::{ToolError, ToolOutput};

/// A callable capability.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Invoke the tool with named arguments.
    async fn invoke(&self, args: &ToolArgs) -> Result<ToolOutput, ToolError>;
}

/// Adapter turning a synchronous closure into a [`Tool`].
pub struct FnTool<F> {
    func: F,
}

impl<F> FnTool<F>
where
    F: Fn(&ToolArgs) -> Result<ToolOutput, ToolError> + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait]
impl<F> Tool for FnTool<F>
where
    F: Fn(&ToolArgs) -> Result<ToolOutput, ToolError> + Send + Sync,
{
    async fn invoke(&self, args: &ToolArgs) -> Result<ToolOutput, ToolError> {
        (self.func)(args)
    }
}

/// Shorthand for `Arc::new(FnTool::new(func))`.
pub fn tool_fn<F>(func: F) -> Arc<dyn Tool>
where
    F: Fn(&ToolArgs) -> Result<ToolOutput, ToolError> + Send + Sync + 'static,
{
    Arc::new(FnTool::new(func))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::ArgsExt;

    #[tokio::test]
    async fn test_fn_tool_invokes_closure() {
        let echo = tool_fn(|args| {
            let msg = args.require_str("msg")?;
            Ok(format!("Echo: {}", msg).into())
        });

        let mut args = ToolArgs::new();
        args.insert("msg".into(), "hello".into());
        let output = echo.invoke(&args).await.unwrap();
        assert_eq!(output, ToolOutput::from("Echo: hello"));
    }

    #[tokio::test]
    async fn test_fn_tool_propagates_errors() {
        let echo = tool_fn(|args| Ok(args.require_str("msg")?.into()));
        let err = echo.invoke(&ToolArgs::new()).await.unwrap_err();
        assert_eq!(err, ToolError::MissingArgument("msg".into()));
    }
}
