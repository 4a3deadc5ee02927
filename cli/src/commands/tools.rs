use std::path::{Path, PathBuf};

use n1ght_core::context::AppContext;
use n1ght_core::error::CliError;
use n1ght_plugins::tools::{codeql_version, java_version, ToolLocator};

/// Print resolved tool paths and versions. Exit 1 if anything is missing.
pub async fn handle_tools(ctx: &AppContext) -> Result<i32, CliError> {
    let tools = &ctx.cfg().tools;
    let locator = ToolLocator::from_config(tools);
    let invoker = ctx.invoker();
    let mut ok = true;

    match locator.java(tools.java.as_deref()) {
        Ok(java) => {
            let version = invoker.invoke(&java_version(&java)).await;
            ok &= report("java", &java, version.map_err(|e| e.to_string()));
        }
        Err(e) => {
            println!("java: not found ({e})");
            ok = false;
        }
    }

    match locator.codeql(tools.codeql.as_deref()) {
        Ok(codeql) => {
            let version = invoker.invoke(&codeql_version(&codeql)).await;
            ok &= report("codeql", &codeql, version.map_err(|e| e.to_string()));
        }
        Err(e) => {
            println!("codeql: not found ({e})");
            ok = false;
        }
    }

    // Only `database` needs ant, so a missing one does not fail the check.
    match locator.ant(tools.ant.as_deref()) {
        Ok(ant) => println!("ant: {}", ant.display()),
        Err(e) => println!("ant: not found ({e})"),
    }

    for (name, jar) in [("procyon", &tools.procyon_jar), ("fernflower", &tools.fernflower_jar)] {
        let jar = PathBuf::from(jar);
        if jar.is_file() {
            println!("{name}: {}", jar.display());
        } else {
            println!("{name}: missing ({})", jar.display());
            ok = false;
        }
    }

    Ok(if ok { 0 } else { 1 })
}

fn report(name: &str, path: &Path, version: Result<String, String>) -> bool {
    match version {
        Ok(out) => {
            let first = out.lines().find(|l| !l.trim().is_empty()).unwrap_or("").trim();
            println!("{name}: {} ({first})", path.display());
            true
        }
        Err(e) => {
            println!("{name}: {} (version check failed: {e})", path.display());
            false
        }
    }
}
