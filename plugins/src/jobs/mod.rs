//! Turning directories on disk into job lists and build inputs.

pub mod database;
pub mod decompile;
pub mod scan;

pub use database::{build_xml, remove_uncompilable_sources, tomcat_classpath, write_build_xml};
pub use decompile::{decompile_jobs, discover_jars, find_lib_dir, DependencySelection};
pub use scan::{
    clean_database_cache, clean_previous_results, discover_queries, pack_install_hint, scan_jobs,
};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Files under `dir` matching `pattern` (relative glob), sorted.
pub(crate) fn glob_sorted(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let base = glob::Pattern::escape(&dir.to_string_lossy());
    let full = format!("{base}/{pattern}");
    let mut out = Vec::new();
    for entry in glob::glob(&full).with_context(|| format!("bad glob pattern {full}"))? {
        let path = entry.with_context(|| format!("reading {}", dir.display()))?;
        if path.is_file() {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}
