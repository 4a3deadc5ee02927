use n1ght_core::context::AppContext;
use n1ght_core::error::CliError;
use n1ght_plugins::factory;
use n1ght_plugins::jobs::{decompile_jobs, discover_jars, find_lib_dir, DependencySelection};

use super::cli::{Args, DecompileArgs};
use super::run::{build_dispatcher, execution_config, finish};

pub async fn handle_decompile(
    args: DecompileArgs,
    global: &Args,
    ctx: &AppContext,
) -> Result<i32, CliError> {
    let exec = execution_config(global, ctx.cfg())?;
    exec.mode()?;

    let lib_dir = match args.lib_dir {
        Some(dir) => dir,
        None => find_lib_dir(&args.input).ok_or_else(|| {
            CliError::Command(format!(
                "no BOOT-INF/lib, WEB-INF/lib or lib directory under {}",
                args.input.display()
            ))
        })?,
    };

    let selection = DependencySelection::parse(&args.deps)
        .map_err(|e| CliError::Command(format!("{e:#}")))?;
    let jars = selection.select(
        discover_jars(&lib_dir).map_err(|e| CliError::Command(format!("{e:#}")))?,
    );
    if jars.is_empty() {
        tracing::info!(lib_dir = %lib_dir.display(), deps = %args.deps, "no dependency jars selected");
        return Ok(0);
    }

    let pair = factory::build_decompiler_pair(ctx.cfg(), args.decompiler.map(Into::into))
        .map_err(|e| CliError::Config(format!("{e:#}")))?;

    // Fernflower refuses to write into a missing directory.
    std::fs::create_dir_all(&args.output)?;

    tracing::info!(
        jars = jars.len(),
        lib_dir = %lib_dir.display(),
        output = %args.output.display(),
        "decompiling dependencies"
    );
    let jobs = decompile_jobs(&jars, &args.output, &args.decompiler_args);
    let summary = build_dispatcher(global, ctx).run(jobs, pair, &exec).await?;
    finish(global, &summary)
}
