//! Bounded-concurrency batch execution of external tools.
//!
//! # Architecture
//!
//! ```text
//! Vec<Job> + FallbackPair + ExecutionConfig
//!   ↓
//! Dispatcher::run()      → validate config, pick mode, RunStart/RunEnd
//!   ↓
//! WorkerPool::execute()  → serial loop, or K workers on a closed queue
//!   ↓
//! FallbackExecutor       → primary, then secondary on failure
//!   ↓
//! ToolInvoker            → one external process per attempt
//!   ↓
//! ResultCollector        → Summary
//! ```

mod collector;
mod engine;
mod fallback;
mod progress;
mod scheduler;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use collector::ResultCollector;
pub use engine::{execute_jobs, Dispatcher, DispatcherBuilder};
pub use fallback::FallbackExecutor;
pub use progress::ProgressMonitor;
pub use scheduler::WorkerPool;
pub use traits::{FallbackPair, JobTool, OutputRendererPlugin, RenderEvent};
pub use types::{
    ExecutionConfig, ExecutionMode, ExecutionOutcome, FailureDetail, Job, Summary, ToolVariant,
};
