//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `n1ght_core::api` instead of reaching into internal modules.

pub use crate::config::{
    load_default, load_from_path, AppConfig, DatabaseConfig, DecompileConfig, LoggingConfig,
    RunnerConfig, ScanConfig, ToolsConfig,
};
pub use crate::context::AppContext;
pub use crate::error::{CliError, ExecutorError, ToolInvocationError};
pub use crate::executor::{
    execute_jobs, Dispatcher, ExecutionConfig, ExecutionMode, ExecutionOutcome, FailureDetail,
    FallbackPair, Job, JobTool, OutputRendererPlugin, RenderEvent, Summary, ToolVariant,
};
pub use crate::runner::{ProcessInvoker, ToolInvocation, ToolInvoker};
