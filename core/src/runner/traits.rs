use async_trait::async_trait;

use crate::error::ToolInvocationError;

use super::types::ToolInvocation;

/// Runs one external command to completion and returns its captured output.
///
/// Implementations hold no per-call state, so one invoker is shared by every
/// worker of a run.
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    async fn invoke(&self, invocation: &ToolInvocation) -> Result<String, ToolInvocationError>;
}
