use std::fmt;
use std::sync::Arc;

use crate::executor::types::Job;
use crate::runner::ToolInvocation;

/// Adapter that turns a job into a concrete command line for one tool.
pub trait JobTool: Send + Sync {
    fn name(&self) -> &str;
    fn invocation(&self, job: &Job) -> ToolInvocation;

    /// Runs on a blocking thread after the tool exited cleanly for `job`.
    /// An error here counts as the tool failing, so the fallback still runs.
    fn finish(&self, _job: &Job) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Two alternative tools for the same job kind. The secondary only runs
/// after the primary has failed.
#[derive(Clone)]
pub struct FallbackPair {
    pub primary: Arc<dyn JobTool>,
    pub secondary: Arc<dyn JobTool>,
}

impl FallbackPair {
    pub fn new(primary: Arc<dyn JobTool>, secondary: Arc<dyn JobTool>) -> Self {
        Self { primary, secondary }
    }
}

impl fmt::Debug for FallbackPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackPair")
            .field("primary", &self.primary.name())
            .field("secondary", &self.secondary.name())
            .finish()
    }
}
