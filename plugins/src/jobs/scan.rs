use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use n1ght_core::executor::Job;

use super::glob_sorted;

pub fn discover_queries(ql_dir: &Path) -> Result<Vec<PathBuf>> {
    if !ql_dir.is_dir() {
        bail!("query directory {} does not exist", ql_dir.display());
    }
    glob_sorted(ql_dir, "**/*.ql")
}

/// One job per query. Outputs are flattened relative paths so two
/// `Query.ql` files in different packs never overwrite each other.
pub fn scan_jobs(queries: &[PathBuf], ql_dir: &Path, results_dir: &Path) -> Vec<Job> {
    queries
        .iter()
        .map(|q| {
            let rel = q.strip_prefix(ql_dir).unwrap_or(q);
            let id = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            let flat = rel
                .with_extension("")
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("_");
            Job::new(id, q, results_dir.join(format!("{flat}.sarif")))
        })
        .collect()
}

/// Delete SARIF/BQRS left over from an earlier scan. Returns how many files went.
pub fn clean_previous_results(results_dir: &Path) -> Result<usize> {
    if !results_dir.is_dir() {
        return Ok(0);
    }
    let mut removed = 0;
    for pattern in ["*.sarif", "*.bqrs"] {
        for file in glob_sorted(results_dir, pattern)? {
            std::fs::remove_file(&file).with_context(|| format!("remove {}", file.display()))?;
            tracing::info!(path = %file.display(), "removed previous result");
            removed += 1;
        }
    }
    Ok(removed)
}

/// Drop the database's evaluation cache so edited queries are recompiled.
pub fn clean_database_cache(database: &Path) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    for sub in ["cache", "results"] {
        let dir = database.join(sub);
        if dir.is_dir() {
            std::fs::remove_dir_all(&dir).with_context(|| format!("remove {}", dir.display()))?;
            tracing::info!(path = %dir.display(), "cleared database cache");
            removed.push(dir);
        }
    }
    Ok(removed)
}

/// Printed after a scan with failures; most query failures are missing packs.
pub fn pack_install_hint(ql_dir: &Path) -> String {
    format!(
        "If queries failed with package errors, install their dependencies:\n  \
         1. cd {}\n  \
         2. codeql pack install",
        ql_dir.display()
    )
}
