use std::path::{Path, PathBuf};

use n1ght_core::context::AppContext;
use n1ght_core::error::CliError;
use n1ght_plugins::jobs::{remove_uncompilable_sources, tomcat_classpath, write_build_xml};
use n1ght_plugins::tools::{database_create, ToolLocator};

use super::cli::DatabaseArgs;

/// Write build.xml for the decompiled tree and let codeql trace an Ant build
/// of it. A failing codeql run is a command error carrying its output.
pub async fn handle_database(args: DatabaseArgs, ctx: &AppContext) -> Result<i32, CliError> {
    let cfg = ctx.cfg();
    let source_root = absolute(&args.source_root)?;
    let src_dir = source_root.join(&args.src);
    if !src_dir.is_dir() {
        return Err(CliError::Command(format!(
            "source directory {} does not exist",
            src_dir.display()
        )));
    }

    let tomcat = args
        .tomcat
        .clone()
        .or_else(|| cfg.database.tomcat_dir.as_ref().map(PathBuf::from))
        .or_else(|| {
            std::env::var_os("CATALINA_HOME")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        });
    let mut classpath = tomcat.as_deref().map(tomcat_classpath).unwrap_or_default();
    for dir in &args.classpath {
        classpath.push(absolute(dir)?);
    }

    let locator = ToolLocator::from_config(&cfg.tools);
    let codeql = locator
        .codeql(cfg.tools.codeql.as_deref())
        .map_err(|e| CliError::Config(format!("{e:#}")))?;
    let ant = locator
        .ant(cfg.tools.ant.as_deref())
        .map_err(|e| CliError::Config(format!("{e:#}")))?;

    remove_uncompilable_sources(&src_dir).map_err(|e| CliError::Command(format!("{e:#}")))?;
    write_build_xml(&source_root, &args.src, &classpath)
        .map_err(|e| CliError::Command(format!("{e:#}")))?;

    let db = absolute(&args.db)?;
    let threads = args.threads.unwrap_or(cfg.database.threads);
    let ram = args.ram.or(cfg.database.ram_mb);
    let invocation = database_create(&codeql, &db, &source_root, &ant, threads, ram);

    tracing::info!(db = %db.display(), source_root = %source_root.display(), "creating database");
    ctx.invoker()
        .invoke(&invocation)
        .await
        .map_err(|e| CliError::Command(format!("database creation failed: {e}")))?;

    println!("database ready: {}", db.display());
    Ok(0)
}

fn absolute(p: &Path) -> Result<PathBuf, CliError> {
    if p.is_absolute() {
        Ok(p.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(p))
    }
}
