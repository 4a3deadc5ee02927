use n1ght_core::executor::traits::{OutputRendererPlugin, RenderEvent};
use n1ght_core::executor::types::{Summary, ToolVariant};

/// Human-readable lines on stdout, ending with a summary block.
pub struct TextRendererPlugin {
    verbose: bool,
}

impl TextRendererPlugin {
    /// `verbose` also prints job start lines and rescue warnings.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn format_event(&self, event: &RenderEvent) -> Option<String> {
        match event {
            RenderEvent::RunStart {
                run_id,
                total_jobs,
                mode,
            } => Some(format!("RUN START {run_id} ({total_jobs} jobs, {mode})")),
            RenderEvent::JobStart { job_id, .. } => {
                self.verbose.then(|| format!("JOB START {job_id}"))
            }
            RenderEvent::JobComplete { outcome, .. } => {
                let status = match (outcome.success, outcome.via) {
                    (true, ToolVariant::Secondary) => "OK (fallback)",
                    (true, _) => "OK",
                    (false, _) => "FAILED",
                };
                let mut line = format!(
                    "JOB END {} {} via {} ({}ms)",
                    outcome.job_id,
                    status,
                    outcome.tool.as_deref().unwrap_or("-"),
                    outcome.duration_ms
                );
                if self.verbose {
                    if let Some(w) = &outcome.warning {
                        line.push_str(&format!("\n  warning: {}", indent(w)));
                    }
                }
                Some(line)
            }
            RenderEvent::RunEnd { run_id, summary } => Some(format_summary(run_id, summary)),
        }
    }
}

fn indent(text: &str) -> String {
    text.trim_end().replace('\n', "\n    ")
}

fn format_summary(run_id: &str, s: &Summary) -> String {
    let mut out = format!("RUN END {run_id}\n");
    out.push_str(&format!("  total:         {}\n", s.total));
    out.push_str(&format!("  succeeded:     {}\n", s.succeeded));
    out.push_str(&format!("  failed:        {}\n", s.failed));
    out.push_str(&format!("  via secondary: {}\n", s.via_secondary));
    out.push_str(&format!("  wall time:     {}ms\n", s.elapsed_ms));
    out.push_str(&format!("  busy time:     {}ms", s.busy_ms));
    if !s.complete {
        out.push_str(&format!(
            "\n  INCOMPLETE: {} of {} jobs reported",
            s.recorded(),
            s.total
        ));
    }
    if !s.failures.is_empty() {
        out.push_str("\n  failures:");
        for f in &s.failures {
            out.push_str(&format!("\n  - {}: {}", f.job_id, indent(&f.error)));
        }
    }
    out
}

impl OutputRendererPlugin for TextRendererPlugin {
    fn name(&self) -> &str {
        "text-renderer"
    }

    fn format(&self) -> &str {
        "text"
    }

    fn render(&self, event: &RenderEvent) {
        if let Some(line) = self.format_event(event) {
            println!("{line}");
        }
    }
}
