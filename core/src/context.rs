use std::sync::Arc;

use crate::config::AppConfig;
use crate::runner::{ProcessInvoker, ToolInvoker};

/// Immutable per-process state handed to command handlers.
#[derive(Clone)]
pub struct AppContext {
    cfg: AppConfig,
    invoker: Arc<dyn ToolInvoker>,
}

impl AppContext {
    /// Context backed by real child processes.
    pub fn new(cfg: AppConfig) -> Self {
        let invoker = Arc::new(ProcessInvoker::new(cfg.runner.capture_bytes));
        Self { cfg, invoker }
    }

    pub fn with_invoker(cfg: AppConfig, invoker: Arc<dyn ToolInvoker>) -> Self {
        Self { cfg, invoker }
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.cfg
    }

    pub fn invoker(&self) -> Arc<dyn ToolInvoker> {
        self.invoker.clone()
    }
}
