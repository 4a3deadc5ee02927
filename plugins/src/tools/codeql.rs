use std::path::{Path, PathBuf};
use std::sync::Arc;

use n1ght_core::executor::{FallbackPair, Job, JobTool};
use n1ght_core::runner::ToolInvocation;

/// `codeql database analyze`, producing SARIF at the job's output path.
pub struct CodeqlAnalyze {
    codeql: PathBuf,
    database: PathBuf,
    threads: u32,
}

impl CodeqlAnalyze {
    pub fn new(codeql: impl Into<PathBuf>, database: impl Into<PathBuf>, threads: u32) -> Self {
        Self {
            codeql: codeql.into(),
            database: database.into(),
            threads,
        }
    }
}

impl JobTool for CodeqlAnalyze {
    fn name(&self) -> &str {
        "codeql-analyze"
    }

    fn invocation(&self, job: &Job) -> ToolInvocation {
        ToolInvocation::new(self.codeql.to_string_lossy())
            .args(["database", "analyze"])
            .arg(self.database.to_string_lossy())
            .arg(job.input.to_string_lossy())
            .arg(format!("--threads={}", self.threads))
            .arg("--format=sarifv2.1.0")
            .arg(format!("--output={}", job.output.display()))
            .args(job.args.iter().cloned())
    }
}

/// `codeql query run`, writing raw BQRS next to where the SARIF would go.
/// Works for queries without the `@kind` metadata `analyze` insists on.
pub struct CodeqlQueryRun {
    codeql: PathBuf,
    database: PathBuf,
    threads: u32,
}

impl CodeqlQueryRun {
    pub fn new(codeql: impl Into<PathBuf>, database: impl Into<PathBuf>, threads: u32) -> Self {
        Self {
            codeql: codeql.into(),
            database: database.into(),
            threads,
        }
    }
}

impl JobTool for CodeqlQueryRun {
    fn name(&self) -> &str {
        "codeql-query-run"
    }

    fn invocation(&self, job: &Job) -> ToolInvocation {
        ToolInvocation::new(self.codeql.to_string_lossy())
            .args(["query", "run"])
            .arg(format!("--database={}", self.database.display()))
            .arg(format!("--threads={}", self.threads))
            .arg(format!("--output={}", job.output.with_extension("bqrs").display()))
            .args(job.args.iter().cloned())
            .arg(job.input.to_string_lossy())
    }
}

/// `codeql database create` for Java, tracing an Ant build of `source_root`.
/// Runs inside `source_root`, so `database` should be absolute.
pub fn database_create(
    codeql: &Path,
    database: &Path,
    source_root: &Path,
    ant: &Path,
    threads: u32,
    ram_mb: Option<u32>,
) -> ToolInvocation {
    let mut ant = ant.to_string_lossy().into_owned();
    if ant.chars().any(char::is_whitespace) {
        ant = format!("\"{ant}\"");
    }
    let inv = ToolInvocation::new(codeql.to_string_lossy())
        .args(["database", "create"])
        .arg(database.to_string_lossy())
        .arg("--language=java")
        .arg(format!("--command={ant} -f build.xml"))
        .arg("--source-root")
        .arg(source_root.to_string_lossy())
        .arg("--overwrite")
        .arg(format!("--threads={threads}"));
    let inv = match ram_mb {
        Some(mb) => inv.arg(format!("--ram={mb}")),
        None => inv,
    };
    inv.current_dir(source_root)
}

pub fn query_pair(codeql: impl Into<PathBuf>, database: impl Into<PathBuf>, threads: u32) -> FallbackPair {
    let codeql = codeql.into();
    let database = database.into();
    FallbackPair::new(
        Arc::new(CodeqlAnalyze::new(codeql.clone(), database.clone(), threads)),
        Arc::new(CodeqlQueryRun::new(codeql, database, threads)),
    )
}
