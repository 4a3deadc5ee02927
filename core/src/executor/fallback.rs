use std::sync::Arc;
use std::time::Instant;

use crate::error::ToolInvocationError;
use crate::runner::ToolInvoker;

use super::traits::{FallbackPair, JobTool};
use super::types::{ExecutionOutcome, Job, ToolVariant};

/// Runs one job against a fallback pair: primary first, secondary only if
/// the primary failed. Never returns an error; failures live in the outcome.
pub struct FallbackExecutor {
    invoker: Arc<dyn ToolInvoker>,
}

impl FallbackExecutor {
    pub fn new(invoker: Arc<dyn ToolInvoker>) -> Self {
        Self { invoker }
    }

    pub async fn execute(&self, job: &Job, pair: &FallbackPair) -> ExecutionOutcome {
        let started = Instant::now();
        let primary = pair.primary.name();
        let secondary = pair.secondary.name();

        let primary_err = match self.attempt(&pair.primary, job).await {
            Ok(output) => {
                tracing::debug!(job = %job.id, tool = primary, "job succeeded");
                return ExecutionOutcome::succeeded(
                    &job.id,
                    ToolVariant::Primary,
                    primary,
                    output,
                    None,
                    elapsed_ms(started),
                );
            }
            Err(e) => e,
        };

        tracing::warn!(
            job = %job.id,
            tool = primary,
            error = %primary_err,
            "primary tool failed, trying {secondary}"
        );

        match self.attempt(&pair.secondary, job).await {
            Ok(output) => {
                tracing::info!(job = %job.id, tool = secondary, "job rescued by secondary tool");
                ExecutionOutcome::succeeded(
                    &job.id,
                    ToolVariant::Secondary,
                    secondary,
                    output,
                    Some(format!("{primary}: {primary_err}")),
                    elapsed_ms(started),
                )
            }
            Err(secondary_err) => {
                tracing::error!(
                    job = %job.id,
                    primary_error = %primary_err,
                    secondary_error = %secondary_err,
                    "both tools failed"
                );
                ExecutionOutcome::failed(
                    &job.id,
                    format!("{primary}: {primary_err}\n{secondary}: {secondary_err}"),
                    elapsed_ms(started),
                )
            }
        }
    }

    async fn attempt(
        &self,
        tool: &Arc<dyn JobTool>,
        job: &Job,
    ) -> Result<String, ToolInvocationError> {
        let output = self.invoker.invoke(&tool.invocation(job)).await?;

        let finisher = Arc::clone(tool);
        let owned = job.clone();
        let finished = tokio::task::spawn_blocking(move || finisher.finish(&owned))
            .await
            .map_err(anyhow::Error::from)
            .and_then(|res| res);
        match finished {
            Ok(()) => Ok(output),
            Err(e) => Err(ToolInvocationError::Finish {
                program: tool.name().to_string(),
                message: format!("{e:#}"),
            }),
        }
    }
}

pub(crate) fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
