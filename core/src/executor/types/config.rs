use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ExecutorError;

/// `[executor]` table: how a batch of jobs is scheduled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Run jobs on a worker pool instead of one after another.
    #[serde(default)]
    pub concurrency_enabled: bool,

    /// Worker count in concurrent mode. Zero is rejected even in serial mode.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

fn default_max_concurrency() -> usize {
    4
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            concurrency_enabled: false,
            max_concurrency: default_max_concurrency(),
        }
    }
}

impl ExecutionConfig {
    pub fn serial() -> Self {
        Self::default()
    }

    pub fn concurrent(max_concurrency: usize) -> Self {
        Self {
            concurrency_enabled: true,
            max_concurrency,
        }
    }

    /// Validate and resolve the scheduling mode.
    pub fn mode(&self) -> Result<ExecutionMode, ExecutorError> {
        if self.max_concurrency == 0 {
            return Err(ExecutorError::Configuration(
                "max_concurrency must be at least 1, got 0".to_string(),
            ));
        }
        Ok(if self.concurrency_enabled {
            ExecutionMode::Concurrent {
                max_concurrency: self.max_concurrency,
            }
        } else {
            ExecutionMode::Serial
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ExecutionMode {
    Serial,
    Concurrent { max_concurrency: usize },
}

impl ExecutionMode {
    /// Upper bound on jobs executing at once.
    pub fn limit(&self) -> usize {
        match self {
            ExecutionMode::Serial => 1,
            ExecutionMode::Concurrent { max_concurrency } => *max_concurrency,
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Serial => write!(f, "serial"),
            ExecutionMode::Concurrent { max_concurrency } => {
                write!(f, "concurrent(max={max_concurrency})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_rejected_in_both_modes() {
        for cfg in [
            ExecutionConfig::concurrent(0),
            ExecutionConfig {
                concurrency_enabled: false,
                max_concurrency: 0,
            },
        ] {
            assert!(matches!(cfg.mode(), Err(ExecutorError::Configuration(_))));
        }
    }

    #[test]
    fn resolves_mode() {
        assert_eq!(ExecutionConfig::serial().mode().unwrap(), ExecutionMode::Serial);
        assert_eq!(
            ExecutionConfig::concurrent(3).mode().unwrap(),
            ExecutionMode::Concurrent { max_concurrency: 3 }
        );
        assert_eq!(ExecutionMode::Serial.limit(), 1);
    }
}
