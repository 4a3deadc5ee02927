use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One unit of work: a single input handed to a single tool run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Stable identifier used in logs and reports, usually the input's name.
    pub id: String,
    pub input: PathBuf,
    pub output: PathBuf,
    /// Extra tool-specific arguments appended by the tool adapters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl Job {
    pub fn new(id: impl Into<String>, input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            input: input.into(),
            output: output.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}
