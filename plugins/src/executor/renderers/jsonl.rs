use chrono::Local;
use n1ght_core::executor::traits::{OutputRendererPlugin, RenderEvent};
use serde_json::{json, Value};

/// One JSON object per line on stdout.
#[derive(Debug, Default)]
pub struct JsonlRendererPlugin;

impl JsonlRendererPlugin {
    pub fn new() -> Self {
        Self
    }

    fn event_to_json(&self, event: &RenderEvent) -> Value {
        let ts = Local::now().to_rfc3339();
        match event {
            RenderEvent::RunStart {
                run_id,
                total_jobs,
                mode,
            } => json!({
                "v": 1,
                "event_type": "run.start",
                "ts": ts,
                "run_id": run_id,
                "metadata": {
                    "total_jobs": total_jobs,
                    "mode": mode,
                }
            }),
            RenderEvent::JobStart { run_id, job_id } => json!({
                "v": 1,
                "event_type": "job.start",
                "ts": ts,
                "run_id": run_id,
                "job_id": job_id,
            }),
            RenderEvent::JobComplete { run_id, outcome } => json!({
                "v": 1,
                "event_type": "job.end",
                "ts": ts,
                "run_id": run_id,
                "job_id": outcome.job_id,
                "success": outcome.success,
                "metadata": {
                    "via": outcome.via,
                    "tool": outcome.tool,
                    "duration_ms": outcome.duration_ms,
                    "warning": outcome.warning,
                    "error": outcome.error,
                }
            }),
            RenderEvent::RunEnd { run_id, summary } => json!({
                "v": 1,
                "event_type": "run.end",
                "ts": ts,
                "run_id": run_id,
                "success": summary.is_success(),
                "metadata": {
                    "total": summary.total,
                    "succeeded": summary.succeeded,
                    "failed": summary.failed,
                    "via_secondary": summary.via_secondary,
                    "elapsed_ms": summary.elapsed_ms,
                    "busy_ms": summary.busy_ms,
                    "peak_in_flight": summary.peak_in_flight,
                    "complete": summary.complete,
                    "failures": summary.failures,
                }
            }),
        }
    }
}

impl OutputRendererPlugin for JsonlRendererPlugin {
    fn name(&self) -> &str {
        "jsonl-renderer"
    }

    fn format(&self) -> &str {
        "jsonl"
    }

    fn render(&self, event: &RenderEvent) {
        match serde_json::to_string(&self.event_to_json(event)) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::warn!(error = %e, "failed to serialize render event"),
        }
    }
}
