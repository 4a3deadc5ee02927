use thiserror::Error;

/// Errors that abort a whole run. Per-job tool failures never surface here;
/// they are recorded in the job's outcome instead.
#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("invalid execution config: {0}")]
    Configuration(String),

    #[error("worker task failed: {0}")]
    Worker(String),
}
