use std::path::PathBuf;

use n1ght_core::context::AppContext;
use n1ght_core::error::CliError;
use n1ght_plugins::factory;
use n1ght_plugins::jobs::{
    clean_database_cache, clean_previous_results, discover_queries, pack_install_hint, scan_jobs,
};

use super::cli::{Args, ScanArgs};
use super::run::{build_dispatcher, execution_config, finish};

pub async fn handle_scan(args: ScanArgs, global: &Args, ctx: &AppContext) -> Result<i32, CliError> {
    let cfg = ctx.cfg();
    let exec = execution_config(global, cfg)?;
    exec.mode()?;

    let threads = args.threads.unwrap_or(cfg.scan.threads);
    if threads == 0 {
        return Err(CliError::Config("--threads must be greater than 0".to_string()));
    }
    if !args.db.is_dir() {
        return Err(CliError::Command(format!(
            "database {} does not exist",
            args.db.display()
        )));
    }

    if args.clean_cache {
        clean_database_cache(&args.db).map_err(|e| CliError::Command(format!("{e:#}")))?;
    }

    let results_dir = args
        .results_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&cfg.scan.results_dir));
    std::fs::create_dir_all(&results_dir)?;
    if !args.keep_results {
        clean_previous_results(&results_dir).map_err(|e| CliError::Command(format!("{e:#}")))?;
    }

    let queries = discover_queries(&args.ql).map_err(|e| CliError::Command(format!("{e:#}")))?;
    if queries.is_empty() {
        tracing::warn!(ql = %args.ql.display(), "no .ql files found");
        return Ok(0);
    }

    let pair = factory::build_query_pair(cfg, &args.db, threads)
        .map_err(|e| CliError::Config(format!("{e:#}")))?;

    tracing::info!(
        queries = queries.len(),
        db = %args.db.display(),
        threads,
        "scanning"
    );
    let jobs = scan_jobs(&queries, &args.ql, &results_dir);
    let summary = build_dispatcher(global, ctx).run(jobs, pair, &exec).await?;

    if summary.failed > 0 {
        eprintln!("{}", pack_install_hint(&args.ql));
    }
    finish(global, &summary)
}
