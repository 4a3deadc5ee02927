use thiserror::Error;

use super::executor::ExecutorError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("executor failed: {0}")]
    Executor(#[from] ExecutorError),
    #[error("command failed: {0}")]
    Command(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl CliError {
    /// Process exit code for an error that aborted the command.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 11,
            CliError::Executor(ExecutorError::Configuration(_)) => 11,
            CliError::Executor(ExecutorError::Worker(_)) => 50,
            CliError::Command(_) => 20,
            CliError::Io(_) => 20,
            CliError::Anyhow(_) => 50,
        }
    }
}
