use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use n1ght_core::config::AppConfig;
use n1ght_core::executor::{FallbackPair, OutputRendererPlugin};

use crate::executor::{JsonlRendererPlugin, TextRendererPlugin};
use crate::tools::{decompiler_pair, query_pair, DecompilerKind, ToolLocator};

pub fn build_renderer(stream_format: &str, verbose: bool) -> Arc<dyn OutputRendererPlugin> {
    match stream_format {
        "jsonl" => Arc::new(JsonlRendererPlugin::new()),
        // Anything other than jsonl behaves like text.
        _ => Arc::new(TextRendererPlugin::new(verbose)),
    }
}

/// Decompiler pair for `kind`, or the configured default when `None`.
pub fn build_decompiler_pair(cfg: &AppConfig, kind: Option<DecompilerKind>) -> Result<FallbackPair> {
    let kind = match kind {
        Some(k) => k,
        None => cfg.decompile.decompiler.parse()?,
    };
    let java = ToolLocator::from_config(&cfg.tools).java(cfg.tools.java.as_deref())?;
    tracing::debug!(primary = %kind, java = %java.display(), "decompiler pair ready");
    Ok(decompiler_pair(kind, java, &cfg.tools))
}

pub fn build_query_pair(cfg: &AppConfig, database: &Path, threads: u32) -> Result<FallbackPair> {
    let codeql = ToolLocator::from_config(&cfg.tools).codeql(cfg.tools.codeql.as_deref())?;
    tracing::debug!(codeql = %codeql.display(), "query pair ready");
    Ok(query_pair(codeql, database, threads))
}
