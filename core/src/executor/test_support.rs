//! In-memory tools and invokers for driving the executor without processes.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::ToolInvocationError;
use crate::executor::traits::{FallbackPair, JobTool};
use crate::executor::types::Job;
use crate::runner::{ToolInvocation, ToolInvoker};

/// Tool whose invocation is `<name> <job id>`.
pub struct NamedTool(pub &'static str);

impl JobTool for NamedTool {
    fn name(&self) -> &str {
        self.0
    }

    fn invocation(&self, job: &Job) -> ToolInvocation {
        ToolInvocation::new(self.0).arg(job.id.clone())
    }
}

pub fn pair(primary: &'static str, secondary: &'static str) -> FallbackPair {
    FallbackPair::new(Arc::new(NamedTool(primary)), Arc::new(NamedTool(secondary)))
}

pub fn jobs(ids: &[&str]) -> Vec<Job> {
    ids.iter()
        .map(|id| Job::new(*id, format!("in/{id}"), "out"))
        .collect()
}

/// Succeeds unless `(tool, job)` is listed as failing. Tracks the order of
/// calls and the peak number of concurrent calls.
#[derive(Default)]
pub struct ScriptedInvoker {
    failing: HashSet<(String, String)>,
    panicking: HashSet<String>,
    delay: Option<Duration>,
    calls: Mutex<Vec<(String, String)>>,
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl ScriptedInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(mut self, tool: &str, job: &str) -> Self {
        self.failing.insert((tool.to_string(), job.to_string()));
        self
    }

    pub fn panic_on(mut self, job: &str) -> Self {
        self.panicking.insert(job.to_string());
        self
    }

    pub fn delay(mut self, d: Duration) -> Self {
        self.delay = Some(d);
        self
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ToolInvoker for ScriptedInvoker {
    async fn invoke(&self, invocation: &ToolInvocation) -> Result<String, ToolInvocationError> {
        let tool = invocation.program.clone();
        let job = invocation.args.first().cloned().unwrap_or_default();
        self.calls.lock().unwrap().push((tool.clone(), job.clone()));

        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
        self.current.fetch_sub(1, Ordering::SeqCst);

        if self.panicking.contains(&job) {
            panic!("scripted panic for {job}");
        }
        if self.failing.contains(&(tool.clone(), job.clone())) {
            return Err(ToolInvocationError::NonZeroExit {
                program: tool.clone(),
                code: Some(1),
                output: format!("{tool} rejected {job}"),
            });
        }
        Ok(format!("{tool} ok {job}"))
    }
}
