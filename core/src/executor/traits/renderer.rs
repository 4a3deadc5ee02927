use crate::executor::types::{ExecutionMode, ExecutionOutcome, Summary};

/// Observer for run events. Renderers must not block for long; they are
/// called from worker tasks.
pub trait OutputRendererPlugin: Send + Sync {
    fn name(&self) -> &str;
    fn format(&self) -> &str;
    fn render(&self, event: &RenderEvent);
}

#[derive(Debug, Clone)]
pub enum RenderEvent {
    RunStart {
        run_id: String,
        total_jobs: usize,
        mode: ExecutionMode,
    },
    JobStart {
        run_id: String,
        job_id: String,
    },
    JobComplete {
        run_id: String,
        outcome: ExecutionOutcome,
    },
    RunEnd {
        run_id: String,
        summary: Summary,
    },
}

impl RenderEvent {
    pub fn run_id(&self) -> &str {
        match self {
            RenderEvent::RunStart { run_id, .. }
            | RenderEvent::JobStart { run_id, .. }
            | RenderEvent::JobComplete { run_id, .. }
            | RenderEvent::RunEnd { run_id, .. } => run_id,
        }
    }
}
