use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use super::fallback::elapsed_ms;
use super::types::{ExecutionMode, ExecutionOutcome, FailureDetail, Summary, ToolVariant};

#[derive(Default)]
struct Tally {
    succeeded: usize,
    failed: usize,
    via_secondary: usize,
    busy_ms: u64,
    failures: Vec<FailureDetail>,
    outcomes: Vec<ExecutionOutcome>,
}

/// Thread-safe accumulator of job outcomes. Each `record` is one critical
/// section, so counters and lists always agree.
pub struct ResultCollector {
    expected: usize,
    started: Instant,
    tally: Mutex<Tally>,
}

impl ResultCollector {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            started: Instant::now(),
            tally: Mutex::new(Tally::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Tally> {
        match self.tally.lock() {
            Ok(t) => t,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn record(&self, outcome: ExecutionOutcome) {
        let mut t = self.lock();
        t.busy_ms += outcome.duration_ms;
        if outcome.success {
            t.succeeded += 1;
            if outcome.via == ToolVariant::Secondary {
                t.via_secondary += 1;
            }
        } else {
            t.failed += 1;
            t.failures.push(FailureDetail {
                job_id: outcome.job_id.clone(),
                error: outcome.error.clone().unwrap_or_default(),
            });
        }
        t.outcomes.push(outcome);
    }

    pub fn recorded(&self) -> usize {
        let t = self.lock();
        t.succeeded + t.failed
    }

    /// Snapshot the tally. `complete` is false if outcomes are missing.
    pub fn finalize(&self, mode: ExecutionMode) -> Summary {
        let t = self.lock();
        let recorded = t.succeeded + t.failed;
        if recorded < self.expected {
            tracing::warn!(
                expected = self.expected,
                recorded,
                "finalizing with missing outcomes"
            );
        }
        Summary {
            run_id: String::new(),
            mode,
            total: self.expected,
            succeeded: t.succeeded,
            failed: t.failed,
            via_secondary: t.via_secondary,
            elapsed_ms: elapsed_ms(self.started),
            busy_ms: t.busy_ms,
            peak_in_flight: 0,
            failures: t.failures.clone(),
            outcomes: t.outcomes.clone(),
            complete: recorded >= self.expected,
        }
    }
}
