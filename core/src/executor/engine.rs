use std::sync::Arc;

use crate::error::ExecutorError;
use crate::runner::ToolInvoker;

use super::fallback::FallbackExecutor;
use super::scheduler::WorkerPool;
use super::traits::{FallbackPair, OutputRendererPlugin, RenderEvent};
use super::types::{ExecutionConfig, Job, Summary};

/// Entry point for a batch run: validates the config, picks the scheduling
/// mode and hands the batch to a [`WorkerPool`].
pub struct Dispatcher {
    invoker: Arc<dyn ToolInvoker>,
    renderer: Option<Arc<dyn OutputRendererPlugin>>,
    progress_bar: bool,
}

pub struct DispatcherBuilder {
    invoker: Arc<dyn ToolInvoker>,
    renderer: Option<Arc<dyn OutputRendererPlugin>>,
    progress_bar: bool,
}

impl DispatcherBuilder {
    pub fn renderer(mut self, renderer: Arc<dyn OutputRendererPlugin>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn progress_bar(mut self, enabled: bool) -> Self {
        self.progress_bar = enabled;
        self
    }

    pub fn build(self) -> Dispatcher {
        Dispatcher {
            invoker: self.invoker,
            renderer: self.renderer,
            progress_bar: self.progress_bar,
        }
    }
}

impl Dispatcher {
    pub fn new(invoker: Arc<dyn ToolInvoker>) -> Self {
        Self::builder(invoker).build()
    }

    pub fn builder(invoker: Arc<dyn ToolInvoker>) -> DispatcherBuilder {
        DispatcherBuilder {
            invoker,
            renderer: None,
            progress_bar: false,
        }
    }

    fn emit(&self, event: RenderEvent) {
        if let Some(r) = &self.renderer {
            r.render(&event);
        }
    }

    /// Run every job through `pair`. Fails only on invalid configuration or
    /// a broken job queue; tool failures are reported in the summary.
    pub async fn run(
        &self,
        jobs: Vec<Job>,
        pair: FallbackPair,
        config: &ExecutionConfig,
    ) -> Result<Summary, ExecutorError> {
        let mode = config.mode()?;
        let run_id = uuid::Uuid::new_v4().to_string();

        tracing::info!(
            run_id = %run_id,
            jobs = jobs.len(),
            mode = %mode,
            primary = pair.primary.name(),
            secondary = pair.secondary.name(),
            "dispatching run"
        );
        self.emit(RenderEvent::RunStart {
            run_id: run_id.clone(),
            total_jobs: jobs.len(),
            mode,
        });

        let pool = WorkerPool::new(Arc::new(FallbackExecutor::new(self.invoker.clone())))
            .with_run_id(run_id.clone())
            .with_renderer(self.renderer.clone())
            .with_progress_bar(self.progress_bar);
        let summary = pool.execute(jobs, &pair, mode).await?;

        tracing::info!(
            run_id = %run_id,
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            via_secondary = summary.via_secondary,
            elapsed_ms = summary.elapsed_ms,
            "run finished"
        );
        self.emit(RenderEvent::RunEnd {
            run_id,
            summary: summary.clone(),
        });
        Ok(summary)
    }
}

/// Convenience wrapper for callers that need no renderer or progress bar.
pub async fn execute_jobs(
    invoker: Arc<dyn ToolInvoker>,
    jobs: Vec<Job>,
    pair: FallbackPair,
    config: &ExecutionConfig,
) -> Result<Summary, ExecutorError> {
    Dispatcher::new(invoker).run(jobs, pair, config).await
}
