use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use futures::FutureExt;
use tokio::sync::{mpsc, Mutex as AsyncMutex};
use tokio::task::JoinSet;

use crate::error::ExecutorError;

use super::collector::ResultCollector;
use super::fallback::{elapsed_ms, FallbackExecutor};
use super::progress::ProgressMonitor;
use super::traits::{FallbackPair, OutputRendererPlugin, RenderEvent};
use super::types::{ExecutionMode, ExecutionOutcome, Job, Summary};

/// Current and peak number of jobs executing at once.
#[derive(Default)]
struct InFlight {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl InFlight {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

/// State every worker of one `execute` call shares.
struct Shared {
    executor: Arc<FallbackExecutor>,
    renderer: Option<Arc<dyn OutputRendererPlugin>>,
    progress: Mutex<ProgressMonitor>,
    in_flight: InFlight,
    collector: ResultCollector,
    run_id: String,
}

impl Shared {
    fn emit(&self, event: RenderEvent) {
        if let Some(r) = &self.renderer {
            r.render(&event);
        }
    }

    fn with_progress(&self, f: impl FnOnce(&mut ProgressMonitor)) {
        let mut guard = match self.progress.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard);
    }

    /// Execute one job and record exactly one outcome for it, even if the
    /// execution panics.
    async fn run_one(&self, worker: usize, job: Job, pair: &FallbackPair) {
        self.in_flight.enter();
        let started = Instant::now();
        tracing::debug!(worker, job = %job.id, "job picked up");
        self.with_progress(|p| p.add_job(&job.id));
        self.emit(RenderEvent::JobStart {
            run_id: self.run_id.clone(),
            job_id: job.id.clone(),
        });

        let outcome = match AssertUnwindSafe(self.executor.execute(&job, pair))
            .catch_unwind()
            .await
        {
            Ok(outcome) => outcome,
            Err(panic) => {
                let msg = panic_message(panic.as_ref());
                tracing::error!(worker, job = %job.id, panic = %msg, "job execution panicked");
                ExecutionOutcome::failed(&job.id, format!("job panicked: {msg}"), elapsed_ms(started))
            }
        };
        self.in_flight.exit();

        self.with_progress(|p| p.complete_job(&job.id, outcome.success, outcome.duration_ms));
        self.emit(RenderEvent::JobComplete {
            run_id: self.run_id.clone(),
            outcome: outcome.clone(),
        });
        self.collector.record(outcome);
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Runs a batch of jobs either one by one on the calling task or on a fixed
/// set of workers draining a shared queue.
pub struct WorkerPool {
    executor: Arc<FallbackExecutor>,
    renderer: Option<Arc<dyn OutputRendererPlugin>>,
    progress_bar: bool,
    run_id: String,
}

impl WorkerPool {
    pub fn new(executor: Arc<FallbackExecutor>) -> Self {
        Self {
            executor,
            renderer: None,
            progress_bar: false,
            run_id: String::new(),
        }
    }

    pub fn with_renderer(mut self, renderer: Option<Arc<dyn OutputRendererPlugin>>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_progress_bar(mut self, enabled: bool) -> Self {
        self.progress_bar = enabled;
        self
    }

    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = run_id.into();
        self
    }

    /// Returns once every job has an outcome and every worker has exited.
    pub async fn execute(
        &self,
        jobs: Vec<Job>,
        pair: &FallbackPair,
        mode: ExecutionMode,
    ) -> Result<Summary, ExecutorError> {
        if mode.limit() == 0 {
            return Err(ExecutorError::Configuration(
                "max_concurrency must be at least 1, got 0".to_string(),
            ));
        }

        let total = jobs.len();
        let shared = Arc::new(Shared {
            executor: self.executor.clone(),
            renderer: self.renderer.clone(),
            progress: Mutex::new(ProgressMonitor::new(total, self.progress_bar)),
            in_flight: InFlight::default(),
            collector: ResultCollector::new(total),
            run_id: self.run_id.clone(),
        });

        match mode {
            ExecutionMode::Serial => {
                for job in jobs {
                    shared.run_one(0, job, pair).await;
                }
            }
            ExecutionMode::Concurrent { max_concurrency } => {
                run_workers(shared.clone(), jobs, pair, max_concurrency).await?;
            }
        }

        let mut summary = shared.collector.finalize(mode);
        summary.run_id = self.run_id.clone();
        summary.peak_in_flight = shared.in_flight.peak();
        shared.with_progress(|p| p.finish(summary.is_success()));
        Ok(summary)
    }
}

async fn run_workers(
    shared: Arc<Shared>,
    jobs: Vec<Job>,
    pair: &FallbackPair,
    max_concurrency: usize,
) -> Result<(), ExecutorError> {
    let total = jobs.len();
    if total == 0 {
        return Ok(());
    }

    // Fill the queue up front and close it; workers exit when it runs dry.
    let (tx, rx) = mpsc::channel::<Job>(total);
    for job in jobs {
        tx.send(job)
            .await
            .map_err(|e| ExecutorError::Worker(format!("job queue closed while enqueuing {}", e.0.id)))?;
    }
    drop(tx);

    let queue = Arc::new(AsyncMutex::new(rx));
    let workers = max_concurrency.min(total);
    tracing::debug!(workers, jobs = total, "starting worker pool");

    let mut set = JoinSet::new();
    for worker in 0..workers {
        let queue = queue.clone();
        let shared = shared.clone();
        let pair = pair.clone();
        set.spawn(async move {
            loop {
                let next = queue.lock().await.recv().await;
                let Some(job) = next else { break };
                shared.run_one(worker, job, &pair).await;
            }
            tracing::trace!(worker, "worker finished");
        });
    }

    while let Some(res) = set.join_next().await {
        if let Err(e) = res {
            // The job this worker held has no outcome; finalize reports it.
            tracing::error!(error = %e, "worker task terminated abnormally");
        }
    }
    Ok(())
}
