mod archive;
pub mod codeql;
pub mod decompiler;
pub mod locate;

pub use codeql::{database_create, query_pair, CodeqlAnalyze, CodeqlQueryRun};
pub use decompiler::{decompiler_pair, DecompilerKind, Fernflower, Procyon};
pub use locate::ToolLocator;

use std::path::Path;

use n1ght_core::runner::ToolInvocation;

/// `java -version`, which prints to stderr.
pub fn java_version(java: &Path) -> ToolInvocation {
    ToolInvocation::new(java.to_string_lossy()).arg("-version")
}

pub fn codeql_version(codeql: &Path) -> ToolInvocation {
    ToolInvocation::new(codeql.to_string_lossy()).args(["version", "--format=terse"])
}
