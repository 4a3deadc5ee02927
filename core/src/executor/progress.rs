use std::collections::HashMap;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Terminal progress for a run: one overall bar plus a spinner per running job.
pub struct ProgressMonitor {
    multi: MultiProgress,
    overall: ProgressBar,
    job_bars: HashMap<String, ProgressBar>,
    enabled: bool,
}

impl ProgressMonitor {
    /// `enabled` is false for machine-readable output or non-TTY runs.
    pub fn new(total_jobs: usize, enabled: bool) -> Self {
        if !enabled {
            return Self {
                multi: MultiProgress::new(),
                overall: ProgressBar::hidden(),
                job_bars: HashMap::new(),
                enabled: false,
            };
        }

        let multi = MultiProgress::new();
        let overall = multi.add(ProgressBar::new(total_jobs as u64));
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} jobs ({percent}%) {msg}")
        {
            overall.set_style(style.progress_chars("█▓▒░  "));
        }
        overall.set_message("starting");

        Self {
            multi,
            overall,
            job_bars: HashMap::new(),
            enabled: true,
        }
    }

    pub fn add_job(&mut self, job_id: &str) {
        if !self.enabled {
            return;
        }

        let bar = self.multi.add(ProgressBar::new_spinner());
        if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.green} {msg}") {
            bar.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
        }
        bar.set_message(job_id.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));

        self.job_bars.insert(job_id.to_string(), bar);
    }

    pub fn complete_job(&mut self, job_id: &str, success: bool, duration_ms: u64) {
        if !self.enabled {
            return;
        }

        if let Some(bar) = self.job_bars.remove(job_id) {
            let mark = if success { "ok" } else { "FAILED" };
            bar.finish_and_clear();
            self.overall
                .set_message(format!("{job_id} {mark} ({duration_ms}ms)"));
        }

        self.overall.inc(1);
    }

    pub fn finish(&self, success: bool) {
        if !self.enabled {
            return;
        }

        let msg = if success {
            "all jobs succeeded"
        } else {
            "finished with failures"
        };
        self.overall.finish_with_message(msg);
    }
}

impl Drop for ProgressMonitor {
    fn drop(&mut self) {
        for (_, bar) in self.job_bars.drain() {
            bar.finish_and_clear();
        }
    }
}
