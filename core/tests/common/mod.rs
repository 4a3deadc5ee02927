#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use n1ght_core::api::{FallbackPair, Job, JobTool, ToolInvocation, ToolInvocationError, ToolInvoker};

/// Tool that marks its invocation `ok` or `fail` per job id.
pub struct ScriptedTool {
    name: &'static str,
    failing: HashSet<String>,
}

impl ScriptedTool {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            failing: HashSet::new(),
        }
    }

    pub fn failing_on(mut self, ids: &[&str]) -> Self {
        self.failing.extend(ids.iter().map(|s| s.to_string()));
        self
    }
}

impl JobTool for ScriptedTool {
    fn name(&self) -> &str {
        self.name
    }

    fn invocation(&self, job: &Job) -> ToolInvocation {
        let verdict = if self.failing.contains(&job.id) { "fail" } else { "ok" };
        ToolInvocation::new(self.name).arg(job.id.clone()).arg(verdict)
    }
}

pub fn pair(primary: ScriptedTool, secondary: ScriptedTool) -> FallbackPair {
    FallbackPair::new(Arc::new(primary), Arc::new(secondary))
}

pub fn jobs(ids: &[&str]) -> Vec<Job> {
    ids.iter()
        .map(|id| Job::new(*id, format!("input/{id}"), "output"))
        .collect()
}

/// Invoker that obeys the tool's verdict and measures concurrency.
#[derive(Default)]
pub struct CountingInvoker {
    delay: Option<Duration>,
    current: AtomicUsize,
    peak: AtomicUsize,
    calls: Mutex<Vec<String>>,
}

impl CountingInvoker {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// `tool:job` in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolInvoker for CountingInvoker {
    async fn invoke(&self, invocation: &ToolInvocation) -> Result<String, ToolInvocationError> {
        let job = invocation.args[0].clone();
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}:{job}", invocation.program));

        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
        self.current.fetch_sub(1, Ordering::SeqCst);

        if invocation.args[1] == "fail" {
            Err(ToolInvocationError::NonZeroExit {
                program: invocation.program.clone(),
                code: Some(1),
                output: format!("{} could not process {job}", invocation.program),
            })
        } else {
            Ok(format!("{} processed {job}", invocation.program))
        }
    }
}
