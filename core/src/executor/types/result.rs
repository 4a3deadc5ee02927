use serde::{Deserialize, Serialize};

use super::config::ExecutionMode;

/// Which tool of a fallback pair produced the final result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolVariant {
    Primary,
    Secondary,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub job_id: String,
    pub success: bool,
    pub via: ToolVariant,
    /// Name of the tool that succeeded.
    pub tool: Option<String>,
    pub output: String,
    pub error: Option<String>,
    /// Set when the secondary rescued the job: the primary's failure.
    pub warning: Option<String>,
    pub duration_ms: u64,
}

impl ExecutionOutcome {
    pub fn succeeded(
        job_id: impl Into<String>,
        via: ToolVariant,
        tool: impl Into<String>,
        output: String,
        warning: Option<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            success: true,
            via,
            tool: Some(tool.into()),
            output,
            error: None,
            warning,
            duration_ms,
        }
    }

    pub fn failed(job_id: impl Into<String>, error: String, duration_ms: u64) -> Self {
        Self {
            job_id: job_id.into(),
            success: false,
            via: ToolVariant::None,
            tool: None,
            output: String::new(),
            error: Some(error),
            warning: None,
            duration_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDetail {
    pub job_id: String,
    pub error: String,
}

/// Aggregate result of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub run_id: String,
    pub mode: ExecutionMode,
    /// Number of jobs the run was asked to execute.
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub via_secondary: usize,
    /// Wall clock time of the whole run.
    pub elapsed_ms: u64,
    /// Sum of per-job durations.
    pub busy_ms: u64,
    pub peak_in_flight: usize,
    pub failures: Vec<FailureDetail>,
    /// Outcomes in arrival order.
    pub outcomes: Vec<ExecutionOutcome>,
    /// False when fewer outcomes arrived than jobs were submitted.
    pub complete: bool,
}

impl Summary {
    pub fn recorded(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn is_success(&self) -> bool {
        self.complete && self.failed == 0
    }

    pub fn failed_ids(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.job_id.as_str()).collect()
    }
}
