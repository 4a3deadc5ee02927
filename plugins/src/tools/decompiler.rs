use std::fmt;

use anyhow::Context;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use n1ght_core::config::ToolsConfig;
use n1ght_core::executor::{FallbackPair, Job, JobTool};
use n1ght_core::runner::ToolInvocation;

use super::archive::extract_jar;

const FERNFLOWER_MAIN: &str = "org.jetbrains.java.decompiler.main.decompiler.ConsoleDecompiler";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompilerKind {
    Procyon,
    Fernflower,
}

impl DecompilerKind {
    pub fn other(self) -> Self {
        match self {
            DecompilerKind::Procyon => DecompilerKind::Fernflower,
            DecompilerKind::Fernflower => DecompilerKind::Procyon,
        }
    }
}

impl FromStr for DecompilerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "procyon" => Ok(DecompilerKind::Procyon),
            "fernflower" => Ok(DecompilerKind::Fernflower),
            other => Err(anyhow::anyhow!(
                "unknown decompiler {other:?} (expected procyon or fernflower)"
            )),
        }
    }
}

impl fmt::Display for DecompilerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecompilerKind::Procyon => write!(f, "procyon"),
            DecompilerKind::Fernflower => write!(f, "fernflower"),
        }
    }
}

/// `java -jar procyon.jar <input> -o <output>`
pub struct Procyon {
    java: PathBuf,
    jar: PathBuf,
}

impl Procyon {
    pub fn new(java: impl Into<PathBuf>, jar: impl Into<PathBuf>) -> Self {
        Self {
            java: java.into(),
            jar: jar.into(),
        }
    }
}

impl JobTool for Procyon {
    fn name(&self) -> &str {
        "procyon"
    }

    fn invocation(&self, job: &Job) -> ToolInvocation {
        ToolInvocation::new(self.java.to_string_lossy())
            .arg("-jar")
            .arg(self.jar.to_string_lossy())
            .arg(job.input.to_string_lossy())
            .arg("-o")
            .arg(job.output.to_string_lossy())
            .args(job.args.iter().cloned())
    }
}

/// Fernflower's console entry point. It writes a sources jar named after
/// the input into the output directory; `finish` unpacks and removes it.
pub struct Fernflower {
    java: PathBuf,
    jar: PathBuf,
}

impl Fernflower {
    pub fn new(java: impl Into<PathBuf>, jar: impl Into<PathBuf>) -> Self {
        Self {
            java: java.into(),
            jar: jar.into(),
        }
    }
}

impl JobTool for Fernflower {
    fn name(&self) -> &str {
        "fernflower"
    }

    fn invocation(&self, job: &Job) -> ToolInvocation {
        ToolInvocation::new(self.java.to_string_lossy())
            .arg("-cp")
            .arg(self.jar.to_string_lossy())
            .arg(FERNFLOWER_MAIN)
            .arg("-dgs=true")
            .args(job.args.iter().cloned())
            .arg(job.input.to_string_lossy())
            .arg(job.output.to_string_lossy())
    }

    fn finish(&self, job: &Job) -> anyhow::Result<()> {
        let Some(name) = job.input.file_name() else {
            return Ok(());
        };
        let sources = job.output.join(name);
        if !sources.is_file() {
            return Ok(());
        }
        let files = extract_jar(&sources, &job.output)?;
        std::fs::remove_file(&sources)
            .with_context(|| format!("remove {}", sources.display()))?;
        tracing::debug!(job = %job.id, files, "fernflower sources unpacked");
        Ok(())
    }
}

/// The chosen decompiler first, the other one as fallback.
pub fn decompiler_pair(kind: DecompilerKind, java: impl Into<PathBuf>, tools: &ToolsConfig) -> FallbackPair {
    let java = java.into();
    let build = |k: DecompilerKind| -> Arc<dyn JobTool> {
        match k {
            DecompilerKind::Procyon => Arc::new(Procyon::new(java.clone(), &tools.procyon_jar)),
            DecompilerKind::Fernflower => {
                Arc::new(Fernflower::new(java.clone(), &tools.fernflower_jar))
            }
        }
    };
    FallbackPair::new(build(kind), build(kind.other()))
}
