//! Pieces shared by the batch commands: config overrides, dispatcher
//! wiring, and turning a summary into an exit code.

use std::path::Path;

use n1ght_core::config::AppConfig;
use n1ght_core::context::AppContext;
use n1ght_core::error::{CliError, ExecutorError};
use n1ght_core::executor::{Dispatcher, ExecutionConfig, Summary};
use n1ght_plugins::factory;

use super::cli::{Args, StreamFormat};

/// Config file values overridden by command-line flags.
pub fn execution_config(args: &Args, cfg: &AppConfig) -> Result<ExecutionConfig, CliError> {
    let mut exec = cfg.executor.clone();
    if args.concurrent {
        exec.concurrency_enabled = true;
    }
    if let Some(n) = args.max_concurrency {
        exec.max_concurrency = usize::try_from(n).map_err(|_| {
            ExecutorError::Configuration(format!("max_concurrency must be at least 1, got {n}"))
        })?;
    }
    Ok(exec)
}

pub fn build_dispatcher(args: &Args, ctx: &AppContext) -> Dispatcher {
    let renderer = factory::build_renderer(args.stream_format.as_str(), args.verbose);
    let progress = args.progress
        && args.stream_format == StreamFormat::Text
        && atty::is(atty::Stream::Stderr);
    Dispatcher::builder(ctx.invoker())
        .renderer(renderer)
        .progress_bar(progress)
        .build()
}

pub fn write_summary_json(path: &Path, summary: &Summary) -> Result<(), CliError> {
    let body = serde_json::to_string_pretty(summary)
        .map_err(|e| CliError::Command(format!("serialize summary: {e}")))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, body)?;
    tracing::info!(path = %path.display(), "summary written");
    Ok(())
}

/// 0 when every job succeeded, 1 when the run finished with failures.
pub fn exit_code_for_summary(summary: &Summary) -> i32 {
    if summary.is_success() {
        0
    } else {
        1
    }
}

pub fn finish(args: &Args, summary: &Summary) -> Result<i32, CliError> {
    if let Some(path) = &args.summary_json {
        write_summary_json(path, summary)?;
    }
    Ok(exit_code_for_summary(summary))
}
